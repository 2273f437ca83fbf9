// ── Manufacturer availability ──
//
// Each manufacturer publishes stock status for its own products. Tables
// are keyed by the uppercase product id; lookups normalize the id the
// same way, so matching is case-insensitive.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::product::ProductId;
use crate::parse::FALLBACK_TEXT;

/// Classified stock status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    LessThan10,
    OutOfStock,
    Unknown,
}

impl StockLevel {
    /// Classify stripped availability text by its status token.
    pub fn classify(text: &str) -> Self {
        text.split_whitespace()
            .find_map(|token| match token {
                "INSTOCK" => Some(Self::InStock),
                "LESSTHAN10" => Some(Self::LessThan10),
                "OUTOFSTOCK" => Some(Self::OutOfStock),
                _ => None,
            })
            .unwrap_or(Self::Unknown)
    }

    /// Human label; `None` for unclassified text.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::InStock => Some("In stock"),
            Self::LessThan10 => Some("Less than 10"),
            Self::OutOfStock => Some("Out of stock"),
            Self::Unknown => None,
        }
    }
}

/// One product's availability: the stripped text plus its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityEntry {
    pub text: String,
    pub level: StockLevel,
}

impl AvailabilityEntry {
    pub fn new(text: String) -> Self {
        let level = StockLevel::classify(&text);
        Self { text, level }
    }
}

impl fmt::Display for AvailabilityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level.label().unwrap_or(&self.text))
    }
}

/// Availability of every product listed by one manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManufacturerAvailability {
    entries: BTreeMap<String, AvailabilityEntry>,
    /// The response was the API's error sentinel.
    pub sentinel: bool,
}

impl ManufacturerAvailability {
    /// Insert under the uppercase form of `id`. A later id wins.
    pub fn insert(&mut self, id: &str, entry: AvailabilityEntry) {
        self.entries.insert(id.to_ascii_uppercase(), entry);
    }

    pub fn get(&self, id: &ProductId) -> Option<&AvailabilityEntry> {
        self.entries.get(&id.availability_key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AvailabilityEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of looking up one product's availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The manufacturer's table has not arrived (or never will).
    Loading,
    /// The manufacturer is loaded but does not list the product.
    NotListed,
    Known(AvailabilityEntry),
}

impl Availability {
    pub fn level(&self) -> Option<StockLevel> {
        match self {
            Self::Known(entry) => Some(entry.level),
            Self::Loading | Self::NotListed => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::NotListed => f.write_str(FALLBACK_TEXT),
            Self::Known(entry) => entry.fmt(f),
        }
    }
}

/// Read-only view over every manufacturer's availability.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityTable {
    manufacturers: Arc<BTreeMap<String, Arc<ManufacturerAvailability>>>,
}

impl AvailabilityTable {
    pub fn new(manufacturers: Arc<BTreeMap<String, Arc<ManufacturerAvailability>>>) -> Self {
        Self { manufacturers }
    }

    /// Look up `product_id` in `manufacturer`'s table.
    pub fn lookup(&self, manufacturer: &str, product_id: &ProductId) -> Availability {
        match self.manufacturers.get(manufacturer) {
            None => Availability::Loading,
            Some(table) => table
                .get(product_id)
                .map_or(Availability::NotListed, |entry| {
                    Availability::Known(entry.clone())
                }),
        }
    }

    pub fn manufacturer(&self, name: &str) -> Option<&Arc<ManufacturerAvailability>> {
        self.manufacturers.get(name)
    }

    pub fn is_loaded(&self, manufacturer: &str) -> bool {
        self.manufacturers.contains_key(manufacturer)
    }

    /// Number of manufacturers with a table.
    pub fn len(&self) -> usize {
        self.manufacturers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }
}
