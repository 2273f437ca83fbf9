//! `stocklist-tui`: interactive terminal browser for the product catalog.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `stocklist-core`'s store subscriptions. One screen: category tabs, an
//! alphabet filter, the product table and the expanded product's detail.
//!
//! Logs go to a file (default `/tmp/stocklist-tui.log`) so they never
//! corrupt the terminal. A background data bridge forwards store changes
//! into the action loop while loads run in their own tasks.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stocklist_core::{Catalog, Selection};

use crate::app::App;

/// Terminal browser for product listings and manufacturer availability.
#[derive(Parser, Debug)]
#[command(name = "stocklist-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "STOCKLIST_PROFILE")]
    profile: Option<String>,

    /// Catalog API base URL (overrides the profile)
    #[arg(short = 'u', long, env = "STOCKLIST_API_URL")]
    api_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/stocklist-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Logs only ever go to `--log-file`: the terminal belongs to the UI.
/// Dropping the guard flushes the writer, so it lives as long as `main`.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = ["warn", "info", "debug"]
        .get(usize::from(cli.verbose))
        .copied()
        .unwrap_or("trace");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            ["stocklist_tui", "stocklist_core", "stocklist_api"]
                .map(|target| format!("{target}={level}"))
                .join(","),
        )
    });

    let dir = cli.log_file.parent().unwrap_or(Path::new("/tmp"));
    let file = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("stocklist-tui.log"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the catalog and the initial selection from config + flags.
fn build_catalog(cli: &Cli) -> Result<(Catalog, Selection)> {
    let cfg = stocklist_config::load_config().wrap_err("failed to load configuration")?;

    let mut catalog_config = stocklist_config::resolve_catalog_config(&cfg, cli.profile.as_deref())?;
    if let Some(ref raw) = cli.api_url {
        catalog_config.api_url = stocklist_config::parse_api_url(raw)?;
    }

    let selection = Selection::new(cfg.defaults.category()?, cfg.defaults.letter()?);
    let catalog = Catalog::new(catalog_config)?;
    Ok((catalog, selection))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A panic during setup must still leave a usable terminal.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let (catalog, selection) = build_catalog(&cli)?;
    info!(
        api_url = %catalog.config().api_url,
        category = %selection.category(),
        letter = %selection.letter(),
        "starting stocklist-tui"
    );

    App::new(catalog, selection).run().await
}
