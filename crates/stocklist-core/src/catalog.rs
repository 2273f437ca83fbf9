// ── Catalog facade ──
//
// Orchestrates one catalog load: three category fetches in parallel, and
// as soon as accessories resolve, one availability request per accessory
// manufacturer. Results land in the CatalogStore as they arrive.

use std::fmt;
use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use stocklist_api::transport::{TlsMode, TransportConfig};
use stocklist_api::{ApiClient, ProductRecord};

use crate::config::{CatalogConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    AvailabilityTable, Category, GroupedCatalog, ManufacturerAvailability, Product,
};
use crate::parse::availability_map;
use crate::store::{CatalogStore, LoadFailure, LoadPhase};
use crate::stream::SnapshotStream;

// ── LoadReport ───────────────────────────────────────────────────

/// What a single fetch was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    Category(Category),
    Manufacturer(String),
}

impl fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(c) => write!(f, "products/{c}"),
            Self::Manufacturer(m) => write!(f, "availability/{m}"),
        }
    }
}

/// Outcome of a [`Catalog::load`]. Failures are collected, never fatal.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Categories that loaded, in display order.
    pub categories: Vec<Category>,
    /// Manufacturers whose availability table was merged.
    pub manufacturers: Vec<String>,
    /// Manufacturers that answered with the error sentinel.
    pub sentinels: Vec<String>,
    pub errors: Vec<(LoadTarget, CoreError)>,
}

impl LoadReport {
    /// No request failed and no sentinel was seen.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.sentinels.is_empty()
    }

    /// The failure flag this load would raise on its own.
    pub fn failure(&self) -> Option<LoadFailure> {
        if !self.errors.is_empty() {
            Some(LoadFailure::Data)
        } else if !self.sentinels.is_empty() {
            Some(LoadFailure::Availability)
        } else {
            None
        }
    }

    /// Remove and return the error for `category`, if its fetch failed.
    pub fn take_category_error(&mut self, category: Category) -> Option<CoreError> {
        let pos = self
            .errors
            .iter()
            .position(|(target, _)| *target == LoadTarget::Category(category))?;
        Some(self.errors.remove(pos).1)
    }
}

// ── Catalog ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CatalogInner>`. Owns the HTTP client and the
/// reactive store; loads are serialized so a reload never interleaves
/// with a load in flight.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    client: ApiClient,
    store: CatalogStore,
    load_lock: Mutex<()>,
}

impl Catalog {
    /// Create a catalog for the configured API. Does not fetch anything;
    /// call [`load()`](Self::load).
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ApiClient::new(config.api_url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a catalog around an existing API client.
    pub fn with_client(config: CatalogConfig, client: ApiClient) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                config,
                client,
                store: CatalogStore::new(),
                load_lock: Mutex::new(()),
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.inner.store
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Fetch every category and every accessory manufacturer's availability.
    ///
    /// Returns once all requests have finished. A failed request raises
    /// the store's failure flag but never cancels the others.
    pub async fn load(&self) -> LoadReport {
        let _guard = self.inner.load_lock.lock().await;
        self.load_all().await
    }

    /// Drop everything fetched so far, clear the failure flag, and load again.
    pub async fn reload(&self) -> LoadReport {
        let _guard = self.inner.load_lock.lock().await;
        self.inner.store.reset();
        info!("catalog reset for reload");
        self.load_all().await
    }

    async fn load_all(&self) -> LoadReport {
        let store = &self.inner.store;
        store.set_phase(LoadPhase::Loading);
        info!(url = %self.inner.config.api_url, "loading catalog");

        let (jackets, shirts, (accessories, availability)) = tokio::join!(
            self.load_category(Category::Jackets),
            self.load_category(Category::Shirts),
            self.load_accessories_with_availability(),
        );

        let mut report = LoadReport::default();
        for (category, result) in [
            (Category::Jackets, jackets),
            (Category::Shirts, shirts),
            (Category::Accessories, accessories),
        ] {
            match result {
                Ok(_) => report.categories.push(category),
                Err(e) => report.errors.push((LoadTarget::Category(category), e)),
            }
        }
        for (manufacturer, result) in availability {
            match result {
                Ok(table) => {
                    if table.sentinel {
                        report.sentinels.push(manufacturer.clone());
                    }
                    report.manufacturers.push(manufacturer);
                }
                Err(e) => report
                    .errors
                    .push((LoadTarget::Manufacturer(manufacturer), e)),
            }
        }

        store.set_phase(LoadPhase::Loaded);
        info!(
            categories = report.categories.len(),
            manufacturers = report.manufacturers.len(),
            errors = report.errors.len(),
            sentinels = report.sentinels.len(),
            "catalog load finished"
        );
        report
    }

    /// Fetch one category, group it, and store it.
    ///
    /// Loading accessories also records the manufacturer list.
    pub async fn load_category(&self, category: Category) -> Result<Arc<GroupedCatalog>, CoreError> {
        match self.fetch_category(category).await {
            Ok(grouped) => Ok(grouped),
            Err(e) => {
                warn!(%category, error = %e, "product fetch failed");
                self.inner.store.raise(LoadFailure::Data);
                Err(e)
            }
        }
    }

    async fn fetch_category(&self, category: Category) -> Result<Arc<GroupedCatalog>, CoreError> {
        let records = self.inner.client.list_products(category.as_path()).await?;

        if category == Category::Accessories {
            let manufacturers = unique_manufacturers(&records);
            debug!(count = manufacturers.len(), "derived manufacturers");
            self.inner.store.set_manufacturers(manufacturers);
        }

        let grouped =
            GroupedCatalog::from_products(records.into_iter().map(Product::from).collect());
        debug!(%category, products = grouped.len(), "category grouped");
        Ok(self.inner.store.categories.upsert(category, grouped))
    }

    /// Fetch one manufacturer's availability and merge it into the store.
    ///
    /// A sentinel response raises [`LoadFailure::Availability`] but its
    /// records (if any) are still merged.
    pub async fn load_availability(
        &self,
        manufacturer: &str,
    ) -> Result<Arc<ManufacturerAvailability>, CoreError> {
        let envelope = match self.inner.client.availability(manufacturer).await {
            Ok(envelope) => envelope,
            Err(e) => {
                let err = CoreError::from(e);
                warn!(manufacturer, error = %err, "availability fetch failed");
                self.inner.store.raise(LoadFailure::Data);
                return Err(err);
            }
        };

        let mut table = availability_map(envelope.response.records());
        if envelope.response.is_error_sentinel() {
            table.sentinel = true;
            self.inner.store.raise(LoadFailure::Availability);
        }
        debug!(manufacturer, entries = table.len(), "availability merged");
        Ok(self
            .inner
            .store
            .availability
            .upsert(manufacturer.to_owned(), table))
    }

    async fn load_accessories_with_availability(
        &self,
    ) -> (
        Result<Arc<GroupedCatalog>, CoreError>,
        Vec<(String, Result<Arc<ManufacturerAvailability>, CoreError>)>,
    ) {
        let accessories = self.load_category(Category::Accessories).await;
        if accessories.is_err() {
            return (accessories, Vec::new());
        }

        let manufacturers = self.inner.store.manufacturers();
        let mut pending: FuturesUnordered<_> = manufacturers
            .iter()
            .map(|m| async move { (m.clone(), self.load_availability(m).await) })
            .collect();

        let mut results = Vec::with_capacity(manufacturers.len());
        while let Some(result) = pending.next().await {
            results.push(result);
        }
        (accessories, results)
    }

    // ── Read accessors ───────────────────────────────────────────

    /// Grouped products for `category`; `None` until it has loaded.
    pub fn grouped(&self, category: Category) -> Option<Arc<GroupedCatalog>> {
        self.inner.store.grouped(category)
    }

    pub fn availability(&self) -> AvailabilityTable {
        self.inner.store.availability_table()
    }

    /// Unique accessory manufacturers, in first-seen order.
    pub fn manufacturers(&self) -> Arc<Vec<String>> {
        self.inner.store.manufacturers()
    }

    pub fn failure(&self) -> Option<LoadFailure> {
        self.inner.store.failure()
    }

    pub fn phase(&self) -> LoadPhase {
        self.inner.store.phase()
    }

    /// Find a product in any loaded category, ignoring ASCII case.
    pub fn find_product(&self, id: &str) -> Option<(Category, Product)> {
        Category::all().find_map(|category| {
            self.grouped(category)
                .and_then(|g| g.find(id).cloned())
                .map(|p| (category, p))
        })
    }

    // ── Subscriptions ────────────────────────────────────────────

    pub fn subscribe_categories(&self) -> SnapshotStream<Category, GroupedCatalog> {
        self.inner.store.subscribe_categories()
    }

    pub fn subscribe_availability(&self) -> SnapshotStream<String, ManufacturerAvailability> {
        self.inner.store.subscribe_availability()
    }

    pub fn subscribe_failure(&self) -> watch::Receiver<Option<LoadFailure>> {
        self.inner.store.subscribe_failure()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<LoadPhase> {
        self.inner.store.subscribe_phase()
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Unique manufacturer names in first-seen order.
fn unique_manufacturers(records: &[ProductRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.manufacturer) {
            seen.push(record.manufacturer.clone());
        }
    }
    seen
}

fn build_transport(config: &CatalogConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        ..TransportConfig::default()
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
