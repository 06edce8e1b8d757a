//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod businesses;
pub mod categories;

pub use businesses::{
    add_owner, delete_business, get_business, get_business_card, list_businesses, list_owners,
    register_business, update_business,
};
pub use categories::{create_category, get_category, list_categories};
