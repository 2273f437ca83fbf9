// ── Central reactive catalog store ──
//
// Holds everything fetched during a load: grouped products per category,
// availability per manufacturer, and the collapsed failure flag shown to
// users. Mutations are broadcast to subscribers via `watch` channels.

mod collection;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

pub use collection::{KeyedCollection, Snapshot};

use crate::model::{AvailabilityTable, Category, GroupedCatalog, ManufacturerAvailability};
use crate::stream::SnapshotStream;

// ── LoadFailure ──────────────────────────────────────────────────

/// The single error flag surfaced to users, with its fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailure {
    /// A product or availability request failed outright.
    Data,
    /// An availability response was the API's error sentinel.
    Availability,
}

impl LoadFailure {
    pub fn message(self) -> &'static str {
        match self {
            Self::Data => {
                "Something went wrong with retrieving the data. Please try refreshing the page."
            }
            Self::Availability => {
                "Something went wrong with retrieving item availability. Please try refreshing the page."
            }
        }
    }
}

// ── LoadPhase ────────────────────────────────────────────────────

/// Lifecycle of the current load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
}

// ── CatalogStore ─────────────────────────────────────────────────

/// Central reactive store for one catalog session.
pub struct CatalogStore {
    pub(crate) categories: KeyedCollection<Category, GroupedCatalog>,
    pub(crate) availability: KeyedCollection<String, ManufacturerAvailability>,
    pub(crate) manufacturers: watch::Sender<Arc<Vec<String>>>,
    pub(crate) failure: watch::Sender<Option<LoadFailure>>,
    pub(crate) phase: watch::Sender<LoadPhase>,
    pub(crate) last_loaded: watch::Sender<Option<DateTime<Utc>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        let (manufacturers, _) = watch::channel(Arc::new(Vec::new()));
        let (failure, _) = watch::channel(None);
        let (phase, _) = watch::channel(LoadPhase::Idle);
        let (last_loaded, _) = watch::channel(None);

        Self {
            categories: KeyedCollection::new(),
            availability: KeyedCollection::new(),
            manufacturers,
            failure,
            phase,
            last_loaded,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn grouped(&self, category: Category) -> Option<Arc<GroupedCatalog>> {
        self.categories.get(&category)
    }

    pub fn availability_table(&self) -> AvailabilityTable {
        AvailabilityTable::new(self.availability.snapshot())
    }

    pub fn manufacturer_availability(&self, name: &str) -> Option<Arc<ManufacturerAvailability>> {
        self.availability.get(&name.to_owned())
    }

    /// Unique accessory manufacturers, in first-seen order.
    pub fn manufacturers(&self) -> Arc<Vec<String>> {
        self.manufacturers.borrow().clone()
    }

    pub fn failure(&self) -> Option<LoadFailure> {
        *self.failure.borrow()
    }

    pub fn phase(&self) -> LoadPhase {
        *self.phase.borrow()
    }

    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        *self.last_loaded.borrow()
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub(crate) fn set_manufacturers(&self, manufacturers: Vec<String>) {
        self.manufacturers
            .send_modify(|m| *m = Arc::new(manufacturers));
    }

    /// Raise the failure flag. A `Data` failure is never downgraded to
    /// `Availability`.
    pub(crate) fn raise(&self, failure: LoadFailure) {
        self.failure.send_if_modified(|current| match (*current, failure) {
            (Some(LoadFailure::Data), _) => false,
            (Some(existing), new) if existing == new => false,
            _ => {
                *current = Some(failure);
                true
            }
        });
    }

    /// Dismiss the failure flag. Only a reload does this.
    pub(crate) fn clear_failure(&self) {
        self.failure.send_if_modified(|current| current.take().is_some());
    }

    pub(crate) fn set_phase(&self, phase: LoadPhase) {
        self.phase.send_if_modified(|current| {
            let changed = *current != phase;
            *current = phase;
            changed
        });
        if phase == LoadPhase::Loaded {
            self.last_loaded.send_modify(|t| *t = Some(Utc::now()));
        }
    }

    /// Drop all fetched data and the failure flag.
    pub(crate) fn reset(&self) {
        self.categories.clear();
        self.availability.clear();
        self.set_manufacturers(Vec::new());
        self.clear_failure();
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_categories(&self) -> SnapshotStream<Category, GroupedCatalog> {
        SnapshotStream::new(self.categories.subscribe())
    }

    pub fn subscribe_availability(&self) -> SnapshotStream<String, ManufacturerAvailability> {
        SnapshotStream::new(self.availability.subscribe())
    }

    pub fn subscribe_failure(&self) -> watch::Receiver<Option<LoadFailure>> {
        self.failure.subscribe()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<LoadPhase> {
        self.phase.subscribe()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_failure_is_not_downgraded() {
        let store = CatalogStore::new();
        store.raise(LoadFailure::Availability);
        assert_eq!(store.failure(), Some(LoadFailure::Availability));

        store.raise(LoadFailure::Data);
        store.raise(LoadFailure::Availability);
        assert_eq!(store.failure(), Some(LoadFailure::Data));
    }

    #[test]
    fn reset_clears_data_and_flag() {
        let store = CatalogStore::new();
        store
            .categories
            .upsert(Category::Jackets, GroupedCatalog::default());
        store.set_manufacturers(vec!["reps".into()]);
        store.raise(LoadFailure::Data);

        store.reset();

        assert!(store.grouped(Category::Jackets).is_none());
        assert!(store.manufacturers().is_empty());
        assert_eq!(store.failure(), None);
    }

    #[test]
    fn loaded_phase_stamps_time() {
        let store = CatalogStore::new();
        assert!(store.last_loaded().is_none());

        store.set_phase(LoadPhase::Loading);
        assert!(store.last_loaded().is_none());
        store.set_phase(LoadPhase::Loaded);
        assert!(store.last_loaded().is_some());
        assert_eq!(store.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn failure_messages_are_fixed() {
        assert!(LoadFailure::Data.message().contains("retrieving the data"));
        assert!(
            LoadFailure::Availability
                .message()
                .contains("retrieving item availability")
        );
    }
}
