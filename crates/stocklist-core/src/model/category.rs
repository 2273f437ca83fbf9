// ── Product categories ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the three fixed product categories.
///
/// The lowercase name doubles as the `/products/{category}` path segment.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    #[default]
    Jackets,
    Shirts,
    Accessories,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// API path segment (`jackets`, `shirts`, `accessories`).
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Jackets => "jackets",
            Self::Shirts => "shirts",
            Self::Accessories => "accessories",
        }
    }

    /// Capitalized label for tabs and headers.
    pub fn title(self) -> &'static str {
        match self {
            Self::Jackets => "Jackets",
            Self::Shirts => "Shirts",
            Self::Accessories => "Accessories",
        }
    }

    /// Position in display order (0-based).
    pub fn index(self) -> usize {
        match self {
            Self::Jackets => 0,
            Self::Shirts => 1,
            Self::Accessories => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Next category, wrapping around.
    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % 3).unwrap_or_default()
    }

    /// Previous category, wrapping around.
    pub fn prev(self) -> Self {
        Self::from_index((self.index() + 2) % 3).unwrap_or_default()
    }
}
