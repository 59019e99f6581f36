use serde::{Deserialize, Serialize};

use crate::{
    dto::coerce_i32,
    error::{AppError, AppResult},
    models::Seller,
    services::{entity_store::Resource, form_editor::Draft},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSellerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i32>,
}

impl Resource for Seller {
    type Create = CreateSellerRequest;
    type Update = UpdateSellerRequest;

    const COLLECTION: &'static str = "sellers";
    const NOUN: &'static str = "seller";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerField {
    Name,
    Email,
    Password,
    Phone,
    Address,
    StatusId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub status_id: String,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl SellerDraft {
    fn status_id(&self) -> Option<i32> {
        non_blank(&self.status_id).map(|s| coerce_i32(&s))
    }
}

impl Draft for SellerDraft {
    type Entity = Seller;
    type Field = SellerField;
    type Rules = ();

    fn from_entity(seller: &Seller) -> Self {
        Self {
            name: seller.name.clone(),
            email: seller.email.clone(),
            password: seller.password.clone(),
            phone: seller.phone.clone().unwrap_or_default(),
            address: seller.address.clone().unwrap_or_default(),
            status_id: seller.status_id.map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    fn set(&mut self, field: SellerField, value: String) {
        match field {
            SellerField::Name => self.name = value,
            SellerField::Email => self.email = value,
            SellerField::Password => self.password = value,
            SellerField::Phone => self.phone = value,
            SellerField::Address => self.address = value,
            SellerField::StatusId => self.status_id = value,
        }
    }

    fn validate(&self, _rules: &()) -> AppResult<()> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "Please fill in all required fields (Name, Email, Password)".into(),
            ));
        }
        Ok(())
    }

    fn create_payload(&self) -> CreateSellerRequest {
        CreateSellerRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            phone: non_blank(&self.phone),
            address: non_blank(&self.address),
            status_id: self.status_id(),
        }
    }

    // The edit form always carries every field, so blank optional fields
    // are sent as empty strings and clear the stored value.
    fn update_payload(&self) -> UpdateSellerRequest {
        UpdateSellerRequest {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            password: Some(self.password.clone()),
            phone: Some(self.phone.clone()),
            address: Some(self.address.clone()),
            status_id: self.status_id(),
        }
    }
}
