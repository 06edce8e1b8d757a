//! Business service
//!
//! Handles business registration, updates, ownership and relation loading.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::{
    Booking, Business, BusinessChanges, BusinessId, Category, HumanResource, NewBusiness,
    ServiceType, User, UserId,
};
use crate::domain::ports::{BusinessRepository, CategoryRepository, UserRepository};
use crate::error::{AppError, DomainError};
use crate::presenters::{resolve_presenter_type, PresenterType};

/// Longest accepted business name
pub const MAX_NAME_LEN: usize = 255;

/// A relation of a business that can be loaded alongside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Owners,
    Humanresources,
    Bookings,
    ServiceTypes,
    Category,
}

impl std::str::FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owners" => Ok(Relation::Owners),
            "humanresources" => Ok(Relation::Humanresources),
            "bookings" => Ok(Relation::Bookings),
            "service_types" | "servicetypes" => Ok(Relation::ServiceTypes),
            "category" => Ok(Relation::Category),
            _ => Err(format!("Unknown relation: {}", s)),
        }
    }
}

/// Parse a comma-separated relation list such as `owners,bookings`
pub fn parse_relations(raw: &str) -> Result<Vec<Relation>, String> {
    let mut relations = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let relation: Relation = part.parse()?;
        if !relations.contains(&relation) {
            relations.push(relation);
        }
    }
    Ok(relations)
}

/// A business with the relations the caller asked for.
///
/// Relations that were not requested stay `None`.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedBusiness {
    pub business: Business,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humanresources: Option<Vec<HumanResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_types: Option<Vec<ServiceType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Service for managing businesses
pub struct BusinessService<BR, UR, CR>
where
    BR: BusinessRepository,
    UR: UserRepository,
    CR: CategoryRepository,
{
    businesses: Arc<BR>,
    users: Arc<UR>,
    categories: Arc<CR>,
}

impl<BR, UR, CR> BusinessService<BR, UR, CR>
where
    BR: BusinessRepository,
    UR: UserRepository,
    CR: CategoryRepository,
{
    pub fn new(businesses: Arc<BR>, users: Arc<UR>, categories: Arc<CR>) -> Self {
        Self {
            businesses,
            users,
            categories,
        }
    }

    /// Register a new business owned by `owner_id`
    pub async fn register(
        &self,
        owner_id: &UserId,
        new_business: &NewBusiness,
    ) -> Result<Business, AppError> {
        validate_name(&new_business.name)?;

        if self.users.find_by_id(owner_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", owner_id)));
        }
        self.ensure_category(new_business).await?;

        let business = self
            .businesses
            .create_with_owner(new_business, owner_id)
            .await?;

        tracing::info!(
            business_id = %business.id,
            slug = %business.slug(),
            owner_id = %owner_id,
            "Registered business"
        );

        Ok(business)
    }

    /// Apply changes to a business and persist them
    pub async fn update(
        &self,
        id: &BusinessId,
        changes: &BusinessChanges,
    ) -> Result<Business, AppError> {
        if changes.is_empty() {
            return Err(AppError::BadRequest("No changes given".to_string()));
        }
        if let Some(name) = &changes.name {
            validate_name(name)?;
        }
        if let Some(category_id) = &changes.category_id {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(AppError::Domain(DomainError::Validation(format!(
                    "Category {} does not exist",
                    category_id
                ))));
            }
        }

        let mut business = self.require(id).await?;
        business.apply(changes, Utc::now());
        self.businesses.save(&business).await?;

        tracing::info!(business_id = %business.id, slug = %business.slug(), "Updated business");

        Ok(business)
    }

    /// Find a business by ID
    pub async fn get_by_id(&self, id: &BusinessId) -> Result<Option<Business>, AppError> {
        Ok(self.businesses.find_by_id(id).await?)
    }

    /// Find a business by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError> {
        Ok(self.businesses.find_by_slug(slug).await?)
    }

    /// List businesses, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Business>, AppError> {
        Ok(self.businesses.find_all(limit, offset).await?)
    }

    /// Delete a business
    pub async fn delete(&self, id: &BusinessId) -> Result<(), AppError> {
        self.businesses.delete(id).await?;
        tracing::info!(business_id = %id, "Deleted business");
        Ok(())
    }

    /// Add an owner to a business. Adding an existing owner is a no-op.
    pub async fn add_owner(&self, id: &BusinessId, user_id: &UserId) -> Result<(), AppError> {
        self.require(id).await?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.businesses.add_owner(id, user_id).await?;
        tracing::info!(business_id = %id, user_id = %user_id, "Added business owner");
        Ok(())
    }

    /// All owners of a business
    pub async fn owners(&self, id: &BusinessId) -> Result<Vec<User>, AppError> {
        self.require(id).await?;
        Ok(self.businesses.owners(id).await?)
    }

    /// The first owner of a business
    pub async fn owner(&self, id: &BusinessId) -> Result<Option<User>, AppError> {
        self.require(id).await?;
        Ok(self.businesses.owner(id).await?)
    }

    /// Load a business by slug together with the requested relations
    pub async fn load(
        &self,
        slug: &str,
        relations: &[Relation],
    ) -> Result<LoadedBusiness, AppError> {
        let business = self
            .businesses
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))?;

        let mut loaded = LoadedBusiness {
            business,
            owners: None,
            humanresources: None,
            bookings: None,
            service_types: None,
            category: None,
        };
        let id = loaded.business.id;

        for relation in relations {
            tracing::debug!(business_id = %id, ?relation, "Loading relation");
            match relation {
                Relation::Owners => loaded.owners = Some(self.businesses.owners(&id).await?),
                Relation::Humanresources => {
                    loaded.humanresources = Some(self.businesses.humanresources(&id).await?)
                }
                Relation::Bookings => loaded.bookings = Some(self.businesses.bookings(&id).await?),
                Relation::ServiceTypes => {
                    loaded.service_types = Some(self.businesses.service_types(&id).await?)
                }
                Relation::Category => loaded.category = Some(self.businesses.category(&id).await?),
            }
        }

        Ok(loaded)
    }

    /// Category of a business
    pub async fn category(&self, id: &BusinessId) -> Result<Category, AppError> {
        Ok(self.businesses.category(id).await?)
    }

    /// Presenter used to render a business
    pub fn presenter_type(&self, business: &Business) -> PresenterType {
        resolve_presenter_type(business)
    }

    async fn require(&self, id: &BusinessId) -> Result<Business, AppError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", id)))
    }

    async fn ensure_category(&self, new_business: &NewBusiness) -> Result<(), AppError> {
        if self
            .categories
            .find_by_id(&new_business.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::Domain(DomainError::Validation(format!(
                "Category {} does not exist",
                new_business.category_id
            ))));
        }
        Ok(())
    }
}

/// Validate a business name before it reaches the normalizer
fn validate_name(name: &str) -> Result<(), AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Domain(DomainError::Validation(format!(
            "Name must be between 1 and {} characters",
            MAX_NAME_LEN
        ))));
    }
    Ok(())
}
