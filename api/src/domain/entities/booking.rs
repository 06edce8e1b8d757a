//! Booking domain entity
//!
//! A reservation of a business's service in a time window, optionally
//! pinned to a specific human resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::business::BusinessId;
use super::humanresource::HumanResourceId;
use super::service_type::ServiceTypeId;

/// Unique identifier for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested, not yet confirmed by the business
    Reserved,
    Confirmed,
    /// Cancelled by either side
    Annulated,
    /// Took place
    Served,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Reserved => write!(f, "reserved"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Annulated => write!(f, "annulated"),
            BookingStatus::Served => write!(f, "served"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reserved" => Ok(BookingStatus::Reserved),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "annulated" => Ok(BookingStatus::Annulated),
            "served" => Ok(BookingStatus::Served),
            _ => Err(format!("Unknown booking status: {}", s)),
        }
    }
}

/// A booking made with a business
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub business_id: BusinessId,
    pub humanresource_id: Option<HumanResourceId>,
    pub service_id: Option<ServiceTypeId>,
    pub start_at: DateTime<Utc>,
    pub finish_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Length of the booked window in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.finish_at - self.start_at).num_minutes()
    }

    /// Whether the booking still holds its slot
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            BookingStatus::Reserved | BookingStatus::Confirmed
        )
    }
}
