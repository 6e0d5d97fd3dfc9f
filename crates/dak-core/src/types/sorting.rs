//! Sorting types for list views.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Short arrow used in table headers.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// A sort specification consisting of a field and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField<F> {
    /// Column or field to sort by.
    pub field: F,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl<F: PartialEq> SortField<F> {
    /// Create a new sort field.
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: F) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: F) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Next sort after a header click on `field`.
    ///
    /// The same field flips direction, a different field starts ascending.
    pub fn toggle(current: Option<Self>, field: F) -> Self {
        match current {
            Some(sort) if sort.field == field => Self::new(field, sort.direction.toggled()),
            _ => Self::asc(field),
        }
    }
}
