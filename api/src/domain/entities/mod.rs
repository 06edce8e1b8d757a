//! Domain entities
//!
//! Pure domain models for the business directory.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod booking;
pub mod business;
pub mod category;
pub mod humanresource;
pub mod service_type;
pub mod user;

pub use booking::{Booking, BookingId, BookingStatus};
pub use business::{slugify, Business, BusinessChanges, BusinessId, NewBusiness};
pub use category::{Category, CategoryId, NewCategory};
pub use humanresource::{HumanResource, HumanResourceId};
pub use service_type::{ServiceType, ServiceTypeId};
pub use user::{NewUser, User, UserId};
