//! Data bridge: connects [`Catalog`] store subscriptions to TUI actions.
//!
//! Runs as a background task that forwards every category arrival,
//! availability merge, failure and load-phase change as an [`Action`]
//! through the TUI's action channel. Loads themselves are started by the
//! app; the bridge only observes the store.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use stocklist_core::store::Snapshot;
use stocklist_core::{AvailabilityTable, Catalog, Category, GroupedCatalog, LoadFailure, LoadPhase};

use crate::action::Action;

pub async fn spawn_data_bridge(
    catalog: Catalog,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut categories = catalog.subscribe_categories();
    let mut availability = catalog.subscribe_availability();
    let mut failure = catalog.subscribe_failure();
    let mut phase = catalog.subscribe_phase();

    // Whatever is already in the store goes out first
    let mut seen = categories.current().clone();
    for (category, grouped) in seen.iter() {
        let _ = action_tx.send(Action::CategoryLoaded(*category, Arc::clone(grouped)));
    }
    let _ = action_tx.send(Action::AvailabilityUpdated(AvailabilityTable::new(
        availability.current().clone(),
    )));
    // A load may already have failed or finished before we subscribed.
    let current_failure = *failure.borrow_and_update();
    if let Some(f) = current_failure {
        let _ = action_tx.send(Action::LoadFailed(f));
    }
    let current_phase = *phase.borrow_and_update();
    if let Some(action) = phase_action(current_phase) {
        let _ = action_tx.send(action);
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = categories.changed() => {
                for (category, grouped) in changed_categories(&seen, &snapshot) {
                    debug!(%category, products = grouped.len(), "dispatching CategoryLoaded");
                    let _ = action_tx.send(Action::CategoryLoaded(category, grouped));
                }
                seen = snapshot;
            }
            Some(snapshot) = availability.changed() => {
                let _ = action_tx.send(Action::AvailabilityUpdated(AvailabilityTable::new(snapshot)));
            }
            Ok(()) = failure.changed() => {
                let current: Option<LoadFailure> = *failure.borrow_and_update();
                if let Some(f) = current {
                    let _ = action_tx.send(Action::LoadFailed(f));
                }
            }
            Ok(()) = phase.changed() => {
                let current = *phase.borrow_and_update();
                if let Some(action) = phase_action(current) {
                    let _ = action_tx.send(action);
                }
            }
        }
    }

    debug!("data bridge shut down");
}

fn phase_action(phase: LoadPhase) -> Option<Action> {
    match phase {
        LoadPhase::Loading => Some(Action::LoadStarted),
        LoadPhase::Loaded => Some(Action::LoadFinished),
        LoadPhase::Idle => None,
    }
}

/// Categories that are new in `next` or whose grouping was replaced.
fn changed_categories(
    prev: &Snapshot<Category, GroupedCatalog>,
    next: &Snapshot<Category, GroupedCatalog>,
) -> Vec<(Category, Arc<GroupedCatalog>)> {
    next.iter()
        .filter(|(category, grouped)| {
            prev.get(category)
                .is_none_or(|old| !Arc::ptr_eq(old, grouped))
        })
        .map(|(category, grouped)| (*category, Arc::clone(grouped)))
        .collect()
}
