use std::sync::Arc;

use crate::{
    api::ApiClient,
    config::ClientConfig,
    dto::{products::{FormVariant, ProductDraft}, sellers::SellerDraft},
    error::AppResult,
    models::{Category, Product, Seller},
    services::{
        dashboard::{DashboardView, load_dashboard},
        entity_store::EntityStore,
        form_editor::FormEditor,
        image_resolver::ImageCatalog,
        session::SessionManager,
    },
};

pub type ProductEditor = FormEditor<ProductDraft, EntityStore<Product>>;
pub type SellerEditor = FormEditor<SellerDraft, EntityStore<Seller>>;

/// Shared stores and services every screen draws from.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub products: Arc<EntityStore<Product>>,
    pub categories: Arc<EntityStore<Category>>,
    pub sellers: Arc<EntityStore<Seller>>,
    pub session: Arc<SessionManager>,
    pub images: Arc<ImageCatalog>,
    pub form_variant: FormVariant,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let api = ApiClient::new(config)?;
        let images = match &config.image_catalog_path {
            Some(path) => ImageCatalog::from_path(path)?,
            None => ImageCatalog::default(),
        };
        Ok(Self {
            products: Arc::new(EntityStore::new(api.clone())),
            categories: Arc::new(EntityStore::new(api.clone())),
            sellers: Arc::new(EntityStore::new(api.clone())),
            session: Arc::new(SessionManager::new(api.clone())),
            images: Arc::new(images),
            form_variant: config.form_variant,
            api,
        })
    }

    pub fn product_editor(&self) -> ProductEditor {
        FormEditor::new(Arc::clone(&self.products), self.form_variant)
    }

    pub fn seller_editor(&self) -> SellerEditor {
        FormEditor::new(Arc::clone(&self.sellers), ())
    }

    pub async fn dashboard(&self) -> AppResult<DashboardView> {
        load_dashboard(&self.api, &self.products, &self.categories).await
    }
}
