//! Business domain entity
//!
//! A commercial entity offering bookable services. Owns the attribute
//! normalization rules: the slug is derived from the name, and empty
//! contact fields are stored as absent.

use deunicode::deunicode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryId;

/// Timezone assigned when none is given
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Unique identifier for a business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(pub Uuid);

impl BusinessId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BusinessId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BusinessId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BusinessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive a URL-safe slug from a human-readable name.
///
/// Transliterates to ASCII (`"Zürich"` becomes `"Zurich"`), lowercases,
/// collapses every run of non-alphanumeric characters into a single `-` and
/// trims hyphens from both ends. Input made only of punctuation yields an
/// empty slug.
pub fn slugify(value: &str) -> String {
    let ascii = deunicode(value);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Empty strings are stored as absent
fn blank_to_none(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// A business registered on the platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub id: BusinessId,
    category_id: CategoryId,
    name: String,
    slug: String,
    description: Option<String>,
    timezone: String,
    phone: Option<String>,
    postal_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// Build a business from creation attributes.
    ///
    /// Every attribute goes through its setter, so the slug is computed and
    /// contact fields are normalized before the entity exists.
    pub fn from_new(id: BusinessId, new: &NewBusiness, now: DateTime<Utc>) -> Self {
        let mut business = Business {
            id,
            category_id: new.category_id,
            name: String::new(),
            slug: String::new(),
            description: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            phone: None,
            postal_address: None,
            created_at: now,
            updated_at: now,
        };

        business
            .set_name(new.name.clone())
            .set_description(new.description.clone());

        if let Some(timezone) = &new.timezone {
            business.set_timezone(timezone.clone());
        }
        if let Some(phone) = &new.phone {
            business.set_phone(phone.clone());
        }
        if let Some(address) = &new.postal_address {
            business.set_postal_address(address.clone());
        }

        business
    }

    /// Rebuild a business from stored columns.
    ///
    /// The stored slug is taken as-is, so a slug that predates a rename
    /// survives a round trip through storage. Empty `phone` and
    /// `postal_address` columns are still read back as absent.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: BusinessId,
        category_id: CategoryId,
        name: String,
        slug: String,
        description: Option<String>,
        timezone: String,
        phone: Option<String>,
        postal_address: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Business {
            id,
            category_id,
            name,
            slug,
            description,
            timezone,
            phone: phone.and_then(blank_to_none),
            postal_address: postal_address.and_then(blank_to_none),
            created_at,
            updated_at,
        }
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn postal_address(&self) -> Option<&str> {
        self.postal_address.as_deref()
    }

    /// Set the name and recompute the slug from it
    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.name = value.into();
        self.slug = slugify(&self.name);
        self
    }

    /// Set the phone number; an empty string clears it
    pub fn set_phone(&mut self, value: impl Into<String>) -> &mut Self {
        self.phone = blank_to_none(value.into());
        self
    }

    /// Set the postal address; an empty string clears it
    pub fn set_postal_address(&mut self, value: impl Into<String>) -> &mut Self {
        self.postal_address = blank_to_none(value.into());
        self
    }

    pub fn set_description(&mut self, value: Option<String>) -> &mut Self {
        self.description = value;
        self
    }

    pub fn set_timezone(&mut self, value: impl Into<String>) -> &mut Self {
        self.timezone = value.into();
        self
    }

    pub fn set_category(&mut self, category_id: CategoryId) -> &mut Self {
        self.category_id = category_id;
        self
    }

    /// Apply a set of changes through the setters and bump `updated_at`
    pub fn apply(&mut self, changes: &BusinessChanges, now: DateTime<Utc>) -> &mut Self {
        if let Some(name) = &changes.name {
            self.set_name(name.clone());
        }
        if let Some(category_id) = changes.category_id {
            self.set_category(category_id);
        }
        if let Some(description) = &changes.description {
            self.set_description(blank_to_none(description.clone()));
        }
        if let Some(timezone) = &changes.timezone {
            self.set_timezone(timezone.clone());
        }
        if let Some(phone) = &changes.phone {
            self.set_phone(phone.clone());
        }
        if let Some(address) = &changes.postal_address {
            self.set_postal_address(address.clone());
        }
        self.updated_at = now;
        self
    }
}

/// Data needed to create a new business
#[derive(Debug, Clone, Deserialize)]
pub struct NewBusiness {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub postal_address: Option<String>,
}

impl NewBusiness {
    pub fn new(category_id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            category_id,
            name: name.into(),
            description: None,
            timezone: None,
            phone: None,
            postal_address: None,
        }
    }
}

/// Partial update of a business. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessChanges {
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
    /// An empty string clears the description
    pub description: Option<String>,
    pub timezone: Option<String>,
    pub phone: Option<String>,
    pub postal_address: Option<String>,
}

impl BusinessChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
            && self.timezone.is_none()
            && self.phone.is_none()
            && self.postal_address.is_none()
    }
}
