// Wire models for the products and availability endpoints.
//
// These mirror the JSON exactly as the API sends it. Domain types with
// stronger invariants live in `stocklist-core`.

use serde::{Deserialize, Serialize};

// ── Products ────────────────────────────────────────────────────────

/// One entry of `GET /products/{category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    #[serde(rename = "type", default)]
    pub product_type: String,
    pub name: String,
    #[serde(default)]
    pub color: Vec<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub manufacturer: String,
}

// ── Availability ────────────────────────────────────────────────────

/// Response wrapper of `GET /availability/{manufacturer}`.
///
/// The API answers `{"code": 200, "response": [...]}` on success and
/// `{"code": 200, "response": "[]"}` when its backend failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityEnvelope {
    #[serde(default)]
    pub code: u16,
    pub response: AvailabilityPayload,
}

/// The `response` field: either availability records or a raw string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityPayload {
    Records(Vec<AvailabilityRecord>),
    Raw(String),
}

impl AvailabilityPayload {
    /// Record count, or character count for a raw string body.
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Raw(raw) => raw.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A two-element body is the API's failure marker (`"[]"`).
    pub fn is_error_sentinel(&self) -> bool {
        self.len() == 2
    }

    /// The records carried by this payload (none for a raw string).
    pub fn records(&self) -> &[AvailabilityRecord] {
        match self {
            Self::Records(records) => records,
            Self::Raw(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<AvailabilityRecord> {
        match self {
            Self::Records(records) => records,
            Self::Raw(_) => Vec::new(),
        }
    }
}

/// One `{id, DATAPAYLOAD}` pair. Ids are uppercase on this endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub id: String,
    #[serde(rename = "DATAPAYLOAD", default)]
    pub payload: Option<String>,
}
