//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::{
    slugify, Booking, BookingId, BookingStatus, Business, BusinessId, Category, CategoryId,
    HumanResource, HumanResourceId, NewBusiness, ServiceType, ServiceTypeId, User, UserId,
};

/// Create a test category with default values
pub fn test_category() -> Category {
    test_category_named("Barbershops")
}

/// Create a test category with a specific name
pub fn test_category_named(name: &str) -> Category {
    Category {
        id: CategoryId::new(),
        slug: slugify(name),
        name: name.to_string(),
        description: Some(format!("{} and related services", name)),
    }
}

/// Create a test user with default values
pub fn test_user() -> User {
    test_user_named("Test User")
}

/// Create a test user with a specific name
pub fn test_user_named(name: &str) -> User {
    let username = slugify(name);
    User {
        id: UserId::new(),
        name: name.to_string(),
        email: format!("{}@example.com", username),
        username,
        created_at: Utc::now(),
    }
}

/// Create a test business with default values
pub fn test_business() -> Business {
    test_business_named("Test Business")
}

/// Create a test business with a specific name
pub fn test_business_named(name: &str) -> Business {
    test_business_in(CategoryId::new(), name)
}

/// Create a test business in a specific category
pub fn test_business_in(category_id: CategoryId, name: &str) -> Business {
    Business::from_new(
        BusinessId::new(),
        &NewBusiness::new(category_id, name),
        Utc::now(),
    )
}

/// Create a test human resource for a business
pub fn test_humanresource(business_id: BusinessId, name: &str) -> HumanResource {
    HumanResource {
        id: HumanResourceId::new(),
        business_id,
        name: name.to_string(),
        slug: slugify(name),
        capacity: 1,
        created_at: Utc::now(),
    }
}

/// Create a test service type for a business
pub fn test_service_type(business_id: BusinessId, name: &str) -> ServiceType {
    ServiceType {
        id: ServiceTypeId::new(),
        business_id,
        name: name.to_string(),
        slug: slugify(name),
        description: None,
    }
}

/// Create a 30 minute reserved booking, `day` days after a fixed date
pub fn test_booking(business_id: BusinessId, day: i64) -> Booking {
    let start_at = Utc
        .with_ymd_and_hms(2026, 3, 2, 10, 0, 0)
        .single()
        .expect("valid fixture date")
        + Duration::days(day);

    Booking {
        id: BookingId::new(),
        business_id,
        humanresource_id: None,
        service_id: None,
        start_at,
        finish_at: start_at + Duration::minutes(30),
        status: BookingStatus::Reserved,
        comments: None,
        created_at: Utc::now(),
    }
}
