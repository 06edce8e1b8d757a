//! Category service
//!
//! Browsing and creating business categories.

use std::sync::Arc;

use crate::domain::entities::{Category, NewCategory};
use crate::domain::ports::CategoryRepository;
use crate::error::{AppError, DomainError};

/// Service for managing categories
pub struct CategoryService<CR>
where
    CR: CategoryRepository,
{
    categories: Arc<CR>,
}

impl<CR> CategoryService<CR>
where
    CR: CategoryRepository,
{
    pub fn new(categories: Arc<CR>) -> Self {
        Self { categories }
    }

    /// All categories, ordered by name
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.categories.find_all().await?)
    }

    /// Find a category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError> {
        Ok(self.categories.find_by_slug(slug).await?)
    }

    /// Create a category. Its slug must not be taken.
    pub async fn create(&self, new_category: &NewCategory) -> Result<Category, AppError> {
        let slug = new_category.slug();
        if slug.is_empty() {
            return Err(AppError::Domain(DomainError::Validation(
                "Category name must contain letters or digits".to_string(),
            )));
        }
        if self.categories.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Category '{}' already exists",
                slug
            ))));
        }

        let category = self.categories.create(new_category).await?;
        tracing::info!(category_id = %category.id, slug = %category.slug, "Created category");
        Ok(category)
    }
}
