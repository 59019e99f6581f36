pub mod confirm;
pub mod dashboard;
pub mod entity_store;
pub mod form_editor;
pub mod image_resolver;
pub mod session;
