use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    dto::{coerce_f64, coerce_i32},
    error::{AppError, AppResult},
    models::Product,
    services::{entity_store::Resource, form_editor::Draft},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category_name: String,
    pub price: f64,
    pub stock: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
}

impl Resource for Product {
    type Create = CreateProductRequest;
    type Update = UpdateProductRequest;

    const COLLECTION: &'static str = "products";
    const NOUN: &'static str = "product";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Which product form's rules apply.
///
/// The web form only insists on a name and lets the category be blank; the
/// mobile form insists on every field. Both are kept rather than picking one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormVariant {
    #[default]
    Web,
    Mobile,
}

impl FromStr for FormVariant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(FormVariant::Web),
            "mobile" => Ok(FormVariant::Mobile),
            other => Err(AppError::Config(format!("unknown form variant `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    CategoryName,
    Price,
    Stock,
}

/// Product form contents, kept as typed text until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category_name: String,
    pub price: String,
    pub stock: String,
}

impl Draft for ProductDraft {
    type Entity = Product;
    type Field = ProductField;
    type Rules = FormVariant;

    fn from_entity(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category_name: product.category_name.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
        }
    }

    fn set(&mut self, field: ProductField, value: String) {
        match field {
            ProductField::Name => self.name = value,
            ProductField::CategoryName => self.category_name = value,
            ProductField::Price => self.price = value,
            ProductField::Stock => self.stock = value,
        }
    }

    fn validate(&self, variant: &FormVariant) -> AppResult<()> {
        match variant {
            FormVariant::Web => {
                if self.name.trim().is_empty() {
                    return Err(AppError::Validation("Product name is required".into()));
                }
            }
            FormVariant::Mobile => {
                let missing = [&self.name, &self.category_name, &self.price, &self.stock]
                    .iter()
                    .any(|v| v.trim().is_empty());
                if missing {
                    return Err(AppError::Validation("Please fill in all fields".into()));
                }
            }
        }
        Ok(())
    }

    fn create_payload(&self) -> CreateProductRequest {
        CreateProductRequest {
            name: self.name.clone(),
            category_name: self.category_name.clone(),
            price: coerce_f64(&self.price),
            stock: coerce_i32(&self.stock),
        }
    }

    fn update_payload(&self) -> UpdateProductRequest {
        UpdateProductRequest {
            name: Some(self.name.clone()),
            category_name: Some(self.category_name.clone()),
            price: Some(coerce_f64(&self.price)),
            stock: Some(coerce_i32(&self.stock)),
        }
    }
}
