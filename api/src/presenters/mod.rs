//! Presentation layer
//!
//! Presenters format entities for display without mutating them. Each
//! presentable entity names its presenter through the `Presentable` trait.

pub mod business;

pub use business::{BusinessPresenter, BusinessView, CardDetails};

use serde::Serialize;

/// Identifies which presenter renders an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenterType {
    Business,
}

impl PresenterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenterType::Business => "business",
        }
    }
}

impl std::fmt::Display for PresenterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities that have a presenter
pub trait Presentable {
    const PRESENTER: PresenterType;
}

impl Presentable for crate::domain::entities::Business {
    const PRESENTER: PresenterType = PresenterType::Business;
}

/// Presenter for an entity. Constant per entity type.
pub fn resolve_presenter_type<T: Presentable>(_entity: &T) -> PresenterType {
    T::PRESENTER
}
