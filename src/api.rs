use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::config::ClientConfig;

/// Why a single request did not produce a usable response.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),
}

/// Thin JSON client over the backend's `/api` root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        let response = self.send(Method::GET, path, self.client.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), RequestFailure> {
        let req = self.client.post(self.url(path)).json(body);
        self.send(Method::POST, path, req).await.map(|_| ())
    }

    /// POST `body` and decode the reply as `T`.
    pub async fn post_for<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestFailure> {
        let req = self.client.post(self.url(path)).json(body);
        let response = self.send(Method::POST, path, req).await?;
        Ok(response.json().await?)
    }

    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), RequestFailure> {
        let req = self.client.put(self.url(path)).json(body);
        self.send(Method::PUT, path, req).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), RequestFailure> {
        let req = self.client.delete(self.url(path));
        self.send(Method::DELETE, path, req).await.map(|_| ())
    }

    // Response bodies of writes vary by endpoint (entity, plain text, empty),
    // so only the status is inspected here.
    async fn send(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<reqwest::Response, RequestFailure> {
        let started = Instant::now();
        let result = req.send().await;
        let ms = started.elapsed().as_millis();
        match result {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(method = %method, path, status = %status, ms = %ms, "request finished");
                if status.is_success() {
                    Ok(response)
                } else {
                    Err(RequestFailure::Status(status))
                }
            }
            Err(err) => {
                tracing::warn!(method = %method, path, ms = %ms, error = %err, "request failed");
                Err(err.into())
            }
        }
    }
}
