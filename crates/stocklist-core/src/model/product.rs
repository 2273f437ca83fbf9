// ── Product ──

use std::fmt;

use serde::{Deserialize, Serialize};
use stocklist_api::ProductRecord;

/// Product identifier as issued by the API.
///
/// The products endpoint uses lowercase ids while availability uses
/// uppercase ones; equality here is exact, and cross-endpoint matching
/// goes through [`ProductId::availability_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-normalized key used by availability tables.
    pub fn availability_key(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Case-insensitive comparison against a raw id.
    pub fn matches(&self, raw: &str) -> bool {
        self.0.eq_ignore_ascii_case(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A catalog item. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: f64,
    pub manufacturer: String,
    pub colors: Vec<String>,
}

impl Product {
    /// Price as shown to users: `52$`.
    pub fn price_label(&self) -> String {
        format!("{}$", self.price)
    }

    /// Comma-separated color labels.
    pub fn colors_label(&self) -> String {
        self.colors.join(", ")
    }

    /// The grouping key: first character of the name, `#` when unnamed.
    pub fn group_letter(&self) -> char {
        self.name.chars().next().unwrap_or('#')
    }
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Self {
            id: ProductId::from(r.id),
            name: r.name,
            product_type: r.product_type,
            price: r.price,
            manufacturer: r.manufacturer,
            colors: r.color,
        }
    }
}
