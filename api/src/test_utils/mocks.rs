//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Booking, Business, BusinessId, Category, CategoryId, HumanResource, NewBusiness, NewCategory,
    NewUser, ServiceType, User, UserId,
};
use crate::domain::ports::{BusinessRepository, CategoryRepository, UserRepository};
use crate::error::DomainError;

type Shared<T> = Arc<RwLock<T>>;

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Shared<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();

        if users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::AlreadyExists(format!(
                "User '{}' already exists",
                new_user.username
            )));
        }

        let user = User {
            id: UserId::new(),
            name: new_user.name.clone(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }
}

// ============================================================================
// In-Memory Category Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Shared<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, category: Category) -> Self {
        self.categories
            .write()
            .unwrap()
            .insert(category.id, category);
        self
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        let mut sorted: Vec<_> = categories.values().cloned().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sorted)
    }

    async fn create(&self, new_category: &NewCategory) -> Result<Category, DomainError> {
        let category = Category {
            id: CategoryId::new(),
            slug: new_category.slug(),
            name: new_category.name.clone(),
            description: new_category.description.clone(),
        };

        let mut categories = self.categories.write().unwrap();
        categories.insert(category.id, category.clone());
        Ok(category)
    }
}

// ============================================================================
// In-Memory Business Repository
// ============================================================================

/// In-memory business store.
///
/// Owner and category lookups read from user and category maps, which can be
/// shared with the corresponding in-memory repositories through `linked`.
#[derive(Default)]
pub struct InMemoryBusinessRepository {
    businesses: Shared<HashMap<BusinessId, Business>>,
    /// Owner links in insertion order
    owners: Shared<Vec<(BusinessId, UserId)>>,
    users: Shared<HashMap<UserId, User>>,
    categories: Shared<HashMap<CategoryId, Category>>,
    humanresources: Shared<Vec<HumanResource>>,
    bookings: Shared<Vec<Booking>>,
    service_types: Shared<Vec<ServiceType>>,
}

impl InMemoryBusinessRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share user and category storage with the given repositories
    pub fn linked(users: &InMemoryUserRepository, categories: &InMemoryCategoryRepository) -> Self {
        Self {
            users: users.users.clone(),
            categories: categories.categories.clone(),
            ..Self::default()
        }
    }

    pub fn with_business(self, business: Business) -> Self {
        self.businesses
            .write()
            .unwrap()
            .insert(business.id, business);
        self
    }

    pub fn with_humanresource(self, humanresource: HumanResource) -> Self {
        self.humanresources.write().unwrap().push(humanresource);
        self
    }

    pub fn with_booking(self, booking: Booking) -> Self {
        self.bookings.write().unwrap().push(booking);
        self
    }

    pub fn with_service_type(self, service_type: ServiceType) -> Self {
        self.service_types.write().unwrap().push(service_type);
        self
    }

    fn ensure_exists(&self, id: &BusinessId) -> Result<(), DomainError> {
        if self.businesses.read().unwrap().contains_key(id) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Business {} not found", id)))
        }
    }

    fn owner_ids(&self, id: &BusinessId) -> Vec<UserId> {
        self.owners
            .read()
            .unwrap()
            .iter()
            .filter(|(business_id, _)| business_id == id)
            .map(|(_, user_id)| *user_id)
            .collect()
    }
}

#[async_trait]
impl BusinessRepository for InMemoryBusinessRepository {
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, DomainError> {
        let businesses = self.businesses.read().unwrap();
        Ok(businesses.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, DomainError> {
        let businesses = self.businesses.read().unwrap();
        Ok(businesses
            .values()
            .filter(|b| b.slug() == slug)
            .min_by_key(|b| b.created_at)
            .cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Business>, DomainError> {
        let businesses = self.businesses.read().unwrap();
        let mut sorted: Vec<_> = businesses.values().cloned().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sorted
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, new_business: &NewBusiness) -> Result<Business, DomainError> {
        let business = Business::from_new(BusinessId::new(), new_business, Utc::now());

        let mut businesses = self.businesses.write().unwrap();
        businesses.insert(business.id, business.clone());
        Ok(business)
    }

    async fn create_with_owner(
        &self,
        new_business: &NewBusiness,
        owner_id: &UserId,
    ) -> Result<Business, DomainError> {
        // Stands in for the owner foreign key
        if !self.users.read().unwrap().contains_key(owner_id) {
            return Err(DomainError::NotFound(format!("User {} not found", owner_id)));
        }

        let business = self.create(new_business).await?;
        self.owners.write().unwrap().push((business.id, *owner_id));
        Ok(business)
    }

    async fn save(&self, business: &Business) -> Result<(), DomainError> {
        let mut businesses = self.businesses.write().unwrap();
        match businesses.get_mut(&business.id) {
            Some(stored) => {
                *stored = business.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "Business {} not found",
                business.id
            ))),
        }
    }

    async fn delete(&self, id: &BusinessId) -> Result<(), DomainError> {
        if self.businesses.write().unwrap().remove(id).is_none() {
            return Err(DomainError::NotFound(format!("Business {} not found", id)));
        }

        self.owners.write().unwrap().retain(|(b, _)| b != id);
        self.humanresources
            .write()
            .unwrap()
            .retain(|h| &h.business_id != id);
        self.bookings.write().unwrap().retain(|b| &b.business_id != id);
        self.service_types
            .write()
            .unwrap()
            .retain(|s| &s.business_id != id);
        Ok(())
    }

    async fn add_owner(&self, id: &BusinessId, user_id: &UserId) -> Result<(), DomainError> {
        self.ensure_exists(id)?;

        let mut owners = self.owners.write().unwrap();
        if !owners.contains(&(*id, *user_id)) {
            owners.push((*id, *user_id));
        }
        Ok(())
    }

    async fn owners(&self, id: &BusinessId) -> Result<Vec<User>, DomainError> {
        let owner_ids = self.owner_ids(id);
        let users = self.users.read().unwrap();
        Ok(owner_ids
            .iter()
            .filter_map(|user_id| users.get(user_id).cloned())
            .collect())
    }

    async fn owner(&self, id: &BusinessId) -> Result<Option<User>, DomainError> {
        Ok(self.owners(id).await?.into_iter().next())
    }

    async fn humanresources(&self, id: &BusinessId) -> Result<Vec<HumanResource>, DomainError> {
        let humanresources = self.humanresources.read().unwrap();
        let mut found: Vec<_> = humanresources
            .iter()
            .filter(|h| &h.business_id == id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn bookings(&self, id: &BusinessId) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().unwrap();
        let mut found: Vec<_> = bookings
            .iter()
            .filter(|b| &b.business_id == id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.start_at.cmp(&b.start_at));
        Ok(found)
    }

    async fn service_types(&self, id: &BusinessId) -> Result<Vec<ServiceType>, DomainError> {
        let service_types = self.service_types.read().unwrap();
        let mut found: Vec<_> = service_types
            .iter()
            .filter(|s| &s.business_id == id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn category(&self, id: &BusinessId) -> Result<Category, DomainError> {
        let category_id = {
            let businesses = self.businesses.read().unwrap();
            businesses
                .get(id)
                .map(|b| b.category_id())
                .ok_or_else(|| DomainError::NotFound(format!("Business {} not found", id)))?
        };

        let categories = self.categories.read().unwrap();
        categories
            .get(&category_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Category of business {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        test_booking, test_business, test_category, test_humanresource, test_service_type,
        test_user_named,
    };

    #[tokio::test]
    async fn owners_are_shared_with_user_repository() {
        let alice = test_user_named("Alice");
        let users = InMemoryUserRepository::new().with_user(alice.clone());
        let categories = InMemoryCategoryRepository::new();
        let business = test_business();
        let repo = InMemoryBusinessRepository::linked(&users, &categories)
            .with_business(business.clone());

        repo.add_owner(&business.id, &alice.id).await.unwrap();
        repo.add_owner(&business.id, &alice.id).await.unwrap();

        let owners = repo.owners(&business.id).await.unwrap();
        assert_eq!(owners, vec![alice]);
    }

    #[tokio::test]
    async fn create_with_unknown_owner_stores_nothing() {
        let users = InMemoryUserRepository::new();
        let category = test_category();
        let categories = InMemoryCategoryRepository::new().with_category(category.clone());
        let repo = InMemoryBusinessRepository::linked(&users, &categories);

        let result = repo
            .create_with_owner(&NewBusiness::new(category.id, "Ghost Biz"), &UserId::new())
            .await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert!(repo.find_all(10, 0).await.unwrap().is_empty());
        assert!(repo.find_by_slug("ghost-biz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_with_owner_links_owner() {
        let alice = test_user_named("Alice");
        let users = InMemoryUserRepository::new().with_user(alice.clone());
        let category = test_category();
        let categories = InMemoryCategoryRepository::new().with_category(category.clone());
        let repo = InMemoryBusinessRepository::linked(&users, &categories);

        let business = repo
            .create_with_owner(&NewBusiness::new(category.id, "Alice Biz"), &alice.id)
            .await
            .unwrap();

        assert_eq!(repo.owners(&business.id).await.unwrap(), vec![alice]);
    }

    #[tokio::test]
    async fn add_owner_to_unknown_business_fails() {
        let repo = InMemoryBusinessRepository::new();
        let result = repo.add_owner(&BusinessId::new(), &UserId::new()).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_drops_relations() {
        let business = test_business();
        let repo = InMemoryBusinessRepository::new()
            .with_business(business.clone())
            .with_humanresource(test_humanresource(business.id, "Chair 1"))
            .with_booking(test_booking(business.id, 0))
            .with_service_type(test_service_type(business.id, "Haircut"));

        repo.delete(&business.id).await.unwrap();

        assert!(repo.humanresources(&business.id).await.unwrap().is_empty());
        assert!(repo.bookings(&business.id).await.unwrap().is_empty());
        assert!(repo.service_types(&business.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_missing_is_not_found() {
        let category = test_category();
        let business = test_business();
        let categories = InMemoryCategoryRepository::new().with_category(category);
        let repo = InMemoryBusinessRepository::linked(&InMemoryUserRepository::new(), &categories)
            .with_business(business.clone());

        let result = repo.category(&business.id).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
