// stocklist-core: Catalog model and reactive data layer between stocklist-api and consumers (CLI/TUI).

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod selection;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Catalog, LoadReport, LoadTarget};
pub use config::{CatalogConfig, DEFAULT_API_URL, TlsVerification};
pub use error::CoreError;
pub use selection::Selection;
pub use store::{CatalogStore, LoadFailure, LoadPhase};
pub use stream::SnapshotStream;

pub use model::{
    Availability, AvailabilityEntry, AvailabilityTable, Category, GroupedCatalog, LetterGroup,
    ManufacturerAvailability, Product, ProductId, StockLevel,
};
pub use parse::{FALLBACK_TEXT, availability_map, strip_markup};
