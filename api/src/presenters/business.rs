//! Business presenter
//!
//! Renders a business as a JSON view for the API and as a markdown card.

use serde::Serialize;

use crate::domain::entities::{Booking, Business, Category, User};

const MISSING: &str = "-";

/// Serializable view of a business
#[derive(Debug, Clone, Serialize)]
pub struct BusinessView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: String,
    pub timezone: String,
    pub phone: Option<String>,
    pub postal_address: Option<String>,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Related records shown on a business card
#[derive(Debug, Default)]
pub struct CardDetails<'a> {
    pub category: Option<&'a Category>,
    pub owner: Option<&'a User>,
    pub bookings: &'a [Booking],
}

/// Formats a business for display
pub struct BusinessPresenter<'a> {
    business: &'a Business,
    base_url: &'a str,
}

impl<'a> BusinessPresenter<'a> {
    pub fn new(business: &'a Business, base_url: &'a str) -> Self {
        Self { business, base_url }
    }

    pub fn display_phone(&self) -> &str {
        self.business.phone().unwrap_or(MISSING)
    }

    pub fn display_address(&self) -> &str {
        self.business.postal_address().unwrap_or(MISSING)
    }

    /// Public landing page of the business
    pub fn public_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.business.slug()
        )
    }

    pub fn to_view(&self) -> BusinessView {
        let business = self.business;
        BusinessView {
            id: business.id.to_string(),
            name: business.name().to_string(),
            slug: business.slug().to_string(),
            description: business.description().map(str::to_string),
            category_id: business.category_id().to_string(),
            timezone: business.timezone().to_string(),
            phone: business.phone().map(str::to_string),
            postal_address: business.postal_address().map(str::to_string),
            url: self.public_url(),
            created_at: business.created_at.to_rfc3339(),
            updated_at: business.updated_at.to_rfc3339(),
        }
    }

    /// Render a markdown card, optionally headed by the category name
    pub fn render_card(&self, details: &CardDetails<'_>) -> String {
        let business = self.business;
        let mut buf = String::new();

        buf.push_str(&format!("# {}\n\n", business.name()));

        if let Some(category) = details.category {
            buf.push_str(&format!("_{}_\n\n", category.name));
        }

        if let Some(description) = business.description() {
            buf.push_str(&format!("{}\n\n", truncate(description, 280)));
        }

        buf.push_str(&format!("- Phone: {}\n", self.display_phone()));
        buf.push_str(&format!("- Address: {}\n", self.display_address()));
        buf.push_str(&format!("- Timezone: {}\n", business.timezone()));
        if let Some(owner) = details.owner {
            buf.push_str(&format!("- Owner: {}\n", owner.name));
        }

        let active: Vec<&Booking> = details.bookings.iter().filter(|b| b.is_active()).collect();
        let minutes: i64 = active.iter().map(|b| b.duration_minutes()).sum();
        buf.push_str(&format!(
            "- Active bookings: {} ({} min)\n",
            active.len(),
            minutes
        ));
        buf.push_str(&format!("- Book online: {}\n", self.public_url()));

        buf
    }
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
