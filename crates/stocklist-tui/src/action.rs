//! Everything that can change UI state. Keys, timers and the data bridge
//! all produce [`Action`]s; only `update` handlers consume them.

use std::sync::Arc;

use stocklist_core::{AvailabilityTable, Category, GroupedCatalog, LoadFailure, ProductId};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Tick,
    Render,
    ToggleHelp,

    // ── Filters and cursor ────────────────────────────────────────
    SelectCategory(Category),
    NextCategory,
    PrevCategory,
    SelectLetter(char),
    NextLetter,
    PrevLetter,
    ToggleProduct(ProductId),
    Collapse,

    // ── Catalog data ──────────────────────────────────────────────
    Reload,
    LoadStarted,
    /// A category's listing arrived or was replaced by a reload.
    CategoryLoaded(Category, Arc<GroupedCatalog>),
    /// The merged availability table after another manufacturer answered.
    AvailabilityUpdated(AvailabilityTable),
    LoadFailed(LoadFailure),
    LoadFinished,
}
