use std::{env, path::PathBuf, time::Duration};

use crate::dto::products::FormVariant;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub image_catalog_path: Option<PathBuf>,
    pub form_variant: FormVariant,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        let timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(30);
        let image_catalog_path = env::var("IMAGE_CATALOG_PATH").ok().map(PathBuf::from);
        let form_variant = match env::var("FORM_VARIANT") {
            Ok(v) => v.parse::<FormVariant>()?,
            Err(_) => FormVariant::Web,
        };
        Ok(Self {
            api_base_url,
            timeout: Duration::from_secs(timeout_secs),
            image_catalog_path,
            form_variant,
        })
    }

    /// Config pointing at an explicit backend, with defaults for everything else.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout: Duration::from_secs(30),
            image_catalog_path: None,
            form_variant: FormVariant::Web,
        }
    }
}
