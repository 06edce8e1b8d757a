//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and presenters.

pub mod business_service;
pub mod category_service;

pub use business_service::{parse_relations, BusinessService, LoadedBusiness, Relation};
pub use category_service::CategoryService;
