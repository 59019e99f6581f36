use std::{collections::HashSet, sync::Arc};

use crate::{
    api::ApiClient,
    error::{AppError, AppResult},
    models::{Category, DashboardStats, Product},
    services::entity_store::{Collection, EntityStore},
};

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub products: Arc<Vec<Product>>,
    pub categories: Arc<Vec<Category>>,
}

impl DashboardView {
    pub fn orphaned_products(&self) -> Vec<&Product> {
        orphaned_products(&self.products, &self.categories)
    }
}

pub async fn fetch_stats(api: &ApiClient) -> AppResult<DashboardStats> {
    api.get_json("dashboard/stats").await.map_err(|err| {
        tracing::warn!(error = %err, "stats load failed");
        AppError::Load("Failed to load dashboard stats".into())
    })
}

/// Read stats, products and categories concurrently.
///
/// Either all three arrive or the whole view fails with one error; there is
/// no partially filled dashboard. Every read runs to completion, so a store
/// whose read succeeded keeps its refreshed snapshot even when a sibling fails.
pub async fn load_dashboard(
    api: &ApiClient,
    products: &EntityStore<Product>,
    categories: &EntityStore<Category>,
) -> AppResult<DashboardView> {
    let joined = futures::join!(fetch_stats(api), products.list(), categories.list());
    match joined {
        (Ok(stats), Ok(products), Ok(categories)) => Ok(DashboardView {
            stats,
            products,
            categories,
        }),
        (stats, products, categories) => {
            let failures = [stats.err(), products.err(), categories.err()];
            for err in failures.iter().flatten() {
                tracing::warn!(error = %err, "dashboard load failed");
            }
            Err(AppError::Load("Failed to load dashboard data".into()))
        }
    }
}

/// Products whose `categoryName` names no known category.
///
/// Category is a by-name soft reference that the backend does not enforce
/// on the client's behalf, so this is reported rather than rejected.
pub fn orphaned_products<'a>(products: &'a [Product], categories: &[Category]) -> Vec<&'a Product> {
    let known: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    products
        .iter()
        .filter(|p| !known.contains(p.category_name.as_str()))
        .collect()
}
