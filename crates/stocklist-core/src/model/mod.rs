// ── Catalog domain model ──
//
// Every type in this module is the canonical representation of catalog
// data. Wire records from `stocklist-api` are converted here once, so
// consumers (CLI/TUI) never touch raw JSON shapes.

pub mod availability;
pub mod category;
pub mod grouped;
pub mod product;

// ── Re-exports ──────────────────────────────────────────────────────
pub use availability::{
    Availability, AvailabilityEntry, AvailabilityTable, ManufacturerAvailability, StockLevel,
};
pub use category::Category;
pub use grouped::{GroupedCatalog, LetterGroup};
pub use product::{Product, ProductId};
