use serde::Serialize;

use crate::{models::Category, services::entity_store::Resource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRequest {
    pub name: String,
}

// The backend only exposes GET for categories; writes surface as mutation errors.
impl Resource for Category {
    type Create = CategoryRequest;
    type Update = CategoryRequest;

    const COLLECTION: &'static str = "categories";
    const NOUN: &'static str = "category";

    fn id(&self) -> i64 {
        self.id
    }
}
