//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Relation accessors return fully materialized collections. Callers decide
//! which relations to load; nothing is fetched behind their back.

use async_trait::async_trait;

use crate::domain::entities::{
    Booking, Business, BusinessId, Category, CategoryId, HumanResource, NewBusiness, NewCategory,
    NewUser, ServiceType, User, UserId,
};
use crate::error::DomainError;

/// Repository for Business entities and their associations
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Find a business by ID
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, DomainError>;

    /// Find a business by slug. Slugs are not guaranteed unique; the oldest
    /// match wins.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, DomainError>;

    /// List businesses, newest first
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Business>, DomainError>;

    /// Create a new business.
    ///
    /// Attributes are normalized through the entity setters before storage.
    async fn create(&self, business: &NewBusiness) -> Result<Business, DomainError>;

    /// Create a new business and associate its first owner in one unit.
    ///
    /// Either both the business and the owner link are stored or neither is.
    async fn create_with_owner(
        &self,
        business: &NewBusiness,
        owner_id: &UserId,
    ) -> Result<Business, DomainError>;

    /// Persist the current attributes of an existing business
    async fn save(&self, business: &Business) -> Result<(), DomainError>;

    /// Delete a business
    async fn delete(&self, id: &BusinessId) -> Result<(), DomainError>;

    // Owners

    /// Associate a user as owner. Associating an existing owner is a no-op.
    async fn add_owner(&self, id: &BusinessId, user_id: &UserId) -> Result<(), DomainError>;

    /// All owners of a business
    async fn owners(&self, id: &BusinessId) -> Result<Vec<User>, DomainError>;

    /// The first owner associated with a business
    async fn owner(&self, id: &BusinessId) -> Result<Option<User>, DomainError>;

    // Relations

    /// Human resources of a business
    async fn humanresources(&self, id: &BusinessId) -> Result<Vec<HumanResource>, DomainError>;

    /// Bookings made with a business, earliest first
    async fn bookings(&self, id: &BusinessId) -> Result<Vec<Booking>, DomainError>;

    /// Service types offered by a business
    async fn service_types(&self, id: &BusinessId) -> Result<Vec<ServiceType>, DomainError>;

    /// Category the business belongs to
    async fn category(&self, id: &BusinessId) -> Result<Category, DomainError>;
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for Category entities
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by ID
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    /// Find a category by slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;

    /// List all categories, ordered by name
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    /// Create a new category
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError>;
}
