// stocklist-api: Async Rust client for the product listing and availability API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod availability;
mod products;

pub use client::ApiClient;
pub use error::Error;
pub use models::{AvailabilityEnvelope, AvailabilityPayload, AvailabilityRecord, ProductRecord};
pub use transport::{TlsMode, TransportConfig};
