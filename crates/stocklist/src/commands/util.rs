//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use stocklist_core::{Catalog, LoadReport};

use crate::cli::GlobalOpts;
use crate::output;

/// Spinner on stderr, hidden when quiet or not attached to a terminal.
pub fn spinner(global: &GlobalOpts, message: &str) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Await `fut` while a spinner runs.
pub async fn with_spinner<F, T>(global: &GlobalOpts, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = spinner(global, message);
    let result = fut.await;
    pb.finish_and_clear();
    result
}

/// Full catalog load behind a spinner.
pub async fn load_catalog(catalog: &Catalog, global: &GlobalOpts) -> LoadReport {
    let report = with_spinner(global, "Loading catalog...", catalog.load()).await;
    for (target, err) in &report.errors {
        tracing::warn!(%target, error = %err, "request failed");
    }
    report
}

/// Whether stdout output should carry color codes.
pub fn color_enabled(global: &GlobalOpts) -> bool {
    output::color_for(global)
}
