//! SeaORM entities
//!
//! Table mappings used by the PostgreSQL adapters. The schema itself is
//! managed outside this service.

pub mod appointments;
pub mod business_user;
pub mod businesses;
pub mod categories;
pub mod humanresources;
pub mod service_types;
pub mod users;
