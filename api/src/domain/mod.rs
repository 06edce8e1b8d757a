//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models, including attribute normalization rules
//! - `ports`: Trait definitions for the persistence gateway

pub mod entities;
pub mod ports;
