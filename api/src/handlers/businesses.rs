//! Business handlers
//!
//! Endpoints for registering, reading and updating businesses.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{parse_relations, Relation};
use crate::domain::entities::{
    Booking, BusinessChanges, BusinessId, Category, HumanResource, NewBusiness, ServiceType, User,
    UserId,
};
use crate::error::{AppError, DomainError};
use crate::presenters::{BusinessPresenter, BusinessView, CardDetails, PresenterType};
use crate::AppState;

/// Query parameters for listing businesses
#[derive(Debug, Deserialize)]
pub struct ListBusinessesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl ListBusinessesQuery {
    /// Limit clamped to 1..=100 and a non-negative offset
    pub fn bounds(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}

/// Query parameters for reading a business
#[derive(Debug, Deserialize)]
pub struct GetBusinessQuery {
    /// Comma-separated relations to load, e.g. `owners,bookings`
    pub include: Option<String>,
}

/// Request to register a new business
#[derive(Debug, Deserialize)]
pub struct RegisterBusinessRequest {
    /// User that will own the business
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub business: NewBusiness,
}

/// Request to add an owner
#[derive(Debug, Deserialize)]
pub struct AddOwnerRequest {
    pub user_id: Uuid,
}

/// A business with its presenter and any requested relations
#[derive(Debug, Serialize)]
pub struct BusinessResponse {
    pub business: BusinessView,
    pub presenter: PresenterType,
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

/// GET /businesses
///
/// List businesses, newest first.
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(query): Query<ListBusinessesQuery>,
) -> Result<Json<Vec<BusinessView>>, AppError> {
    let (limit, offset) = query.bounds();
    let businesses = state.business_service.list(limit, offset).await?;

    let views = businesses
        .iter()
        .map(|b| BusinessPresenter::new(b, &state.public_base_url).to_view())
        .collect();

    Ok(Json(views))
}

/// POST /businesses
///
/// Register a business owned by an existing user.
pub async fn register_business(
    State(state): State<AppState>,
    Json(request): Json<RegisterBusinessRequest>,
) -> Result<(StatusCode, Json<BusinessView>), AppError> {
    let business = state
        .business_service
        .register(&UserId(request.owner_id), &request.business)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BusinessPresenter::new(&business, &state.public_base_url).to_view()),
    ))
}

/// GET /businesses/:business
///
/// Get a business by slug. `?include=` names the relations to load with it.
pub async fn get_business(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<GetBusinessQuery>,
) -> Result<Json<BusinessResponse>, AppError> {
    let relations = match query.include.as_deref() {
        Some(raw) => parse_relations(raw).map_err(AppError::BadRequest)?,
        None => Vec::new(),
    };

    let loaded = state.business_service.load(&slug, &relations).await?;
    let presenter = state.business_service.presenter_type(&loaded.business);

    Ok(Json(BusinessResponse {
        business: BusinessPresenter::new(&loaded.business, &state.public_base_url).to_view(),
        presenter,
        owners: loaded.owners,
        humanresources: loaded.humanresources,
        bookings: loaded.bookings,
        service_types: loaded.service_types,
        category: loaded.category,
    }))
}

/// GET /businesses/:business/card
///
/// Markdown card for a business, looked up by slug.
pub async fn get_business_card(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let loaded = state
        .business_service
        .load(&slug, &[Relation::Bookings])
        .await?;
    let business = &loaded.business;

    let category = missing_as_none(state.business_service.category(&business.id).await)?;
    let owner = state.business_service.owner(&business.id).await?;

    let details = CardDetails {
        category: category.as_ref(),
        owner: owner.as_ref(),
        bookings: loaded.bookings.as_deref().unwrap_or_default(),
    };
    let card = BusinessPresenter::new(business, &state.public_base_url).render_card(&details);

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        card,
    )
        .into_response())
}

/// A record the card can do without; storage failures still propagate
fn missing_as_none<T>(result: Result<T, AppError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AppError::Domain(DomainError::NotFound(msg))) => {
            tracing::warn!("Rendering card without related record: {}", msg);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// PATCH /businesses/:business
///
/// Update a business by ID. Empty `phone` or `postal_address` clears them.
pub async fn update_business(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<BusinessChanges>,
) -> Result<Json<BusinessView>, AppError> {
    let business = state
        .business_service
        .update(&BusinessId(id), &changes)
        .await?;

    Ok(Json(
        BusinessPresenter::new(&business, &state.public_base_url).to_view(),
    ))
}

/// DELETE /businesses/:business
pub async fn delete_business(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.business_service.delete(&BusinessId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /businesses/:business/owners
pub async fn list_owners(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<User>>, AppError> {
    let owners = state.business_service.owners(&BusinessId(id)).await?;
    Ok(Json(owners))
}

/// POST /businesses/:business/owners
pub async fn add_owner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddOwnerRequest>,
) -> Result<Json<Vec<User>>, AppError> {
    let business_id = BusinessId(id);
    state
        .business_service
        .add_owner(&business_id, &UserId(request.user_id))
        .await?;

    let owners = state.business_service.owners(&business_id).await?;
    Ok(Json(owners))
}
