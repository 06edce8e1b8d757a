//! Service type domain entity
//!
//! A kind of service a business offers (haircut, check-up, oil change).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::business::BusinessId;

/// Unique identifier for a service type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceTypeId(pub Uuid);

impl ServiceTypeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ServiceTypeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ServiceTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service offered by a business
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceType {
    pub id: ServiceTypeId,
    pub business_id: BusinessId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
