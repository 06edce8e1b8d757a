//! Human resource domain entity
//!
//! A staff member or bookable resource (a chair, a room) of a business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::business::BusinessId;

/// Unique identifier for a human resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HumanResourceId(pub Uuid);

impl HumanResourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HumanResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HumanResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resource that can serve bookings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanResource {
    pub id: HumanResourceId,
    pub business_id: BusinessId,
    pub name: String,
    pub slug: String,
    /// How many bookings it can serve at the same time
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}
