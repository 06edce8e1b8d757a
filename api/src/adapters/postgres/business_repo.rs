//! PostgreSQL adapter for BusinessRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::domain::entities::{
    Booking, BookingId, BookingStatus, Business, BusinessId, Category, CategoryId, HumanResource,
    HumanResourceId, NewBusiness, ServiceType, ServiceTypeId, User, UserId,
};
use crate::domain::ports::BusinessRepository;
use crate::entity::{
    appointments, business_user, businesses, categories, humanresources, service_types, users,
};
use crate::error::DomainError;

/// PostgreSQL implementation of BusinessRepository
pub struct PostgresBusinessRepository {
    db: DatabaseConnection,
}

impl PostgresBusinessRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(business: &Business) -> businesses::ActiveModel {
    businesses::ActiveModel {
        id: Set(business.id.0),
        category_id: Set(business.category_id().0),
        name: Set(business.name().to_string()),
        slug: Set(business.slug().to_string()),
        description: Set(business.description().map(str::to_string)),
        timezone: Set(business.timezone().to_string()),
        phone: Set(business.phone().map(str::to_string)),
        postal_address: Set(business.postal_address().map(str::to_string)),
        created_at: Set(business.created_at.fixed_offset()),
        updated_at: Set(business.updated_at.fixed_offset()),
    }
}

#[async_trait]
impl BusinessRepository for PostgresBusinessRepository {
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, DomainError> {
        let result = businesses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, DomainError> {
        let result = businesses::Entity::find()
            .filter(businesses::Column::Slug.eq(slug))
            .order_by_asc(businesses::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Business>, DomainError> {
        let results = businesses::Entity::find()
            .order_by_desc(businesses::Column::CreatedAt)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, business: &NewBusiness) -> Result<Business, DomainError> {
        let business = Business::from_new(BusinessId::new(), business, Utc::now());

        let result = active_model(&business)
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(business_id = %business.id, slug = %business.slug(), "Inserted business");

        Ok(result.into())
    }

    async fn create_with_owner(
        &self,
        business: &NewBusiness,
        owner_id: &UserId,
    ) -> Result<Business, DomainError> {
        let business = Business::from_new(BusinessId::new(), business, Utc::now());

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = active_model(&business)
            .insert(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        business_user::Entity::insert(business_user::ActiveModel {
            business_id: Set(business.id.0),
            user_id: Set(owner_id.0),
            created_at: Set(business.created_at.fixed_offset()),
        })
        .exec_without_returning(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(
            business_id = %business.id,
            owner_id = %owner_id,
            "Inserted business with owner"
        );

        Ok(result.into())
    }

    async fn save(&self, business: &Business) -> Result<(), DomainError> {
        active_model(business)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    DomainError::NotFound(format!("Business {} not found", business.id))
                }
                e => DomainError::Database(e.to_string()),
            })?;

        Ok(())
    }

    async fn delete(&self, id: &BusinessId) -> Result<(), DomainError> {
        let result = businesses::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!("Business {} not found", id)))
        } else {
            Ok(())
        }
    }

    async fn add_owner(&self, id: &BusinessId, user_id: &UserId) -> Result<(), DomainError> {
        let model = business_user::ActiveModel {
            business_id: Set(id.0),
            user_id: Set(user_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        };

        business_user::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    business_user::Column::BusinessId,
                    business_user::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn owners(&self, id: &BusinessId) -> Result<Vec<User>, DomainError> {
        let results = users::Entity::find()
            .join(JoinType::InnerJoin, users::Relation::BusinessUser.def())
            .filter(business_user::Column::BusinessId.eq(id.0))
            .order_by_asc(business_user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn owner(&self, id: &BusinessId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .join(JoinType::InnerJoin, users::Relation::BusinessUser.def())
            .filter(business_user::Column::BusinessId.eq(id.0))
            .order_by_asc(business_user::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn humanresources(&self, id: &BusinessId) -> Result<Vec<HumanResource>, DomainError> {
        let results = humanresources::Entity::find()
            .filter(humanresources::Column::BusinessId.eq(id.0))
            .order_by_asc(humanresources::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn bookings(&self, id: &BusinessId) -> Result<Vec<Booking>, DomainError> {
        let results = appointments::Entity::find()
            .filter(appointments::Column::BusinessId.eq(id.0))
            .order_by_asc(appointments::Column::StartAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn service_types(&self, id: &BusinessId) -> Result<Vec<ServiceType>, DomainError> {
        let results = service_types::Entity::find()
            .filter(service_types::Column::BusinessId.eq(id.0))
            .order_by_asc(service_types::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn category(&self, id: &BusinessId) -> Result<Category, DomainError> {
        let (_, category) = businesses::Entity::find_by_id(id.0)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Business {} not found", id)))?;

        category
            .map(|m| m.into())
            .ok_or_else(|| DomainError::NotFound(format!("Category of business {} not found", id)))
    }
}

/// Convert SeaORM model to domain entity
impl From<businesses::Model> for Business {
    fn from(model: businesses::Model) -> Self {
        Business::restore(
            BusinessId(model.id),
            CategoryId(model.category_id),
            model.name,
            model.slug,
            model.description,
            model.timezone,
            model.phone,
            model.postal_address,
            model.created_at.with_timezone(&Utc),
            model.updated_at.with_timezone(&Utc),
        )
    }
}

/// Convert SeaORM model to domain entity
impl From<humanresources::Model> for HumanResource {
    fn from(model: humanresources::Model) -> Self {
        HumanResource {
            id: HumanResourceId(model.id),
            business_id: BusinessId(model.business_id),
            name: model.name,
            slug: model.slug,
            capacity: model.capacity.unwrap_or(1),
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<appointments::Model> for Booking {
    fn from(model: appointments::Model) -> Self {
        Booking {
            id: BookingId(model.id),
            business_id: BusinessId(model.business_id),
            humanresource_id: model.humanresource_id.map(HumanResourceId),
            service_id: model.service_id.map(ServiceTypeId),
            start_at: model.start_at.with_timezone(&Utc),
            finish_at: model.finish_at.with_timezone(&Utc),
            status: model
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or(BookingStatus::Reserved),
            comments: model.comments,
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<service_types::Model> for ServiceType {
    fn from(model: service_types::Model) -> Self {
        ServiceType {
            id: ServiceTypeId(model.id),
            business_id: BusinessId(model.business_id),
            name: model.name,
            slug: model.slug,
            description: model.description,
        }
    }
}
