//! `stocklist`: product listings and manufacturer availability from the
//! command line.

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use stocklist_core::Catalog;

use crate::cli::{Cli, Command, CompletionsArgs};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let status = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(status);
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = ["warn", "info", "debug"]
        .get(usize::from(verbose))
        .copied()
        .unwrap_or("trace");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;

    match command {
        // Must work with a broken or missing config file, and offline.
        Command::Config(args) => {
            let cfg = config::load_config_or_default();
            config::apply_defaults(&mut global, &cfg.defaults);
            commands::config_cmd::handle(args, &global)
        }
        Command::Completions(args) => {
            print_completions(&args);
            Ok(())
        }
        cmd => {
            let cfg = config::load_config()?;
            config::apply_defaults(&mut global, &cfg.defaults);

            let catalog = Catalog::new(config::build_catalog_config(&global, &cfg)?)?;
            tracing::debug!(api_url = %catalog.config().api_url, command = ?cmd, "running");
            commands::dispatch(cmd, &catalog, &global, &cfg.defaults).await
        }
    }
}

fn print_completions(args: &CompletionsArgs) {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "stocklist",
        &mut std::io::stdout(),
    );
}
