use std::{collections::HashMap, path::Path};

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Product,
};

pub const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/400x300/4CAF50/ffffff?text=Product";

const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=400&h=300&fit=crop";

const BUILTIN: &[(&str, [&str; 4])] = &[
    (
        "Electronics",
        [
            "photo-1498049794561-7780e7231661",
            "photo-1526738549149-8e07eca6c147",
            "photo-1505740420928-5e560c06d30e",
            "photo-1511385348-c1122a2b7f75",
        ],
    ),
    (
        "Mobiles",
        [
            "photo-1511707171634-5f897ff02aa9",
            "photo-1598327105666-5b89351aff97",
            "photo-1601784551446-20c9e07cdbdb",
            "photo-1592286927505-ed6f8b3b2f80",
        ],
    ),
    (
        "Food",
        [
            "photo-1546069901-ba9599a7e63c",
            "photo-1565299624946-b28f40a0ae38",
            "photo-1504674900247-0877df9cc836",
            "photo-1555939594-58d7cb561ad1",
        ],
    ),
    (
        "Fashion",
        [
            "photo-1523381210434-271e8be1f52b",
            "photo-1591047139829-d91aecb6caea",
            "photo-1460353581641-37baddab0fa2",
            "photo-1516762689617-e1cffcef479d",
        ],
    ),
    (
        "Books",
        [
            "photo-1495446815901-a7297e633e8d",
            "photo-1512820790803-83ca734da794",
            "photo-1544947950-fa07a98d237f",
            "photo-1481627834876-b7833e8f5570",
        ],
    ),
    (
        "Stationery",
        [
            "photo-1544947950-fa07a98d237f",
            "photo-1517842645767-c639042777db",
            "photo-1583485088034-697b5bc54ccc",
            "photo-1586075010923-2dd4570fb338",
        ],
    ),
    (
        "Home & Garden",
        [
            "photo-1556909114-f6e7ad7d3136",
            "photo-1615875221249-4e1c4c4c5901",
            "photo-1558618666-fcd25c85cd64",
            "photo-1513694203232-719a280e022f",
        ],
    ),
];

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=400&h=300&fit=crop")
}

/// On-disk form of an [`ImageCatalog`].
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: HashMap<String, Vec<String>>,
    #[serde(default)]
    default: Option<Vec<String>>,
    #[serde(default)]
    placeholder: Option<String>,
}

/// Ordered fallback images per category name.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    categories: HashMap<String, Vec<String>>,
    default: Vec<String>,
    placeholder: String,
}

impl Default for ImageCatalog {
    fn default() -> Self {
        let categories: HashMap<String, Vec<String>> = BUILTIN
            .iter()
            .map(|(name, photos)| {
                let uris = photos.iter().map(|p| unsplash(p)).collect::<Vec<_>>();
                (name.to_string(), uris)
            })
            .collect();
        Self {
            categories,
            default: vec![DEFAULT_IMAGE.to_string()],
            placeholder: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ImageCatalog {
    pub fn new(
        categories: HashMap<String, Vec<String>>,
        default: Vec<String>,
        placeholder: impl Into<String>,
    ) -> AppResult<Self> {
        if default.is_empty() {
            return Err(AppError::Config("default image list is empty".into()));
        }
        if let Some((name, _)) = categories.iter().find(|(_, list)| list.is_empty()) {
            return Err(AppError::Config(format!(
                "image list for category `{name}` is empty"
            )));
        }
        Ok(Self {
            categories,
            default,
            placeholder: placeholder.into(),
        })
    }

    /// Read a JSON catalog. Missing `default`/`placeholder` fall back to the built-ins.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("invalid image catalog: {e}")))?;
        let builtin = Self::default();
        Self::new(
            file.categories,
            file.default.unwrap_or(builtin.default),
            file.placeholder.unwrap_or(builtin.placeholder),
        )
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read image catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Candidates for `category`, or the default list when it has none.
    pub fn candidates(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(self.default.as_slice())
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Display image for `product`.
    ///
    /// A stored `imageUrl` always wins. Otherwise the product's id picks a
    /// candidate round-robin: id 1 gets the first, id 2 the second, and so on,
    /// wrapping at the end of the list.
    pub fn resolve<'a>(&'a self, product: &'a Product) -> &'a str {
        if let Some(url) = product.image_url.as_deref().filter(|u| !u.is_empty()) {
            return url;
        }
        let candidates = self.candidates(&product.category_name);
        let len = candidates.len() as i128;
        let index = (i128::from(product.id) - 1).rem_euclid(len) as usize;
        &candidates[index]
    }

    /// What the render layer should show once it knows whether loading the
    /// resolved image failed. Does not affect later [`resolve`](Self::resolve) calls.
    pub fn display_uri<'a>(&'a self, product: &'a Product, load_failed: bool) -> &'a str {
        if load_failed {
            &self.placeholder
        } else {
            self.resolve(product)
        }
    }
}
