//! Command dispatch: bridges CLI args -> Catalog reads -> output formatting.

pub mod availability;
pub mod config_cmd;
pub mod letters;
pub mod manufacturers;
pub mod products;
pub mod show;
pub mod util;

use stocklist_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::config::Defaults;
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    catalog: &Catalog,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(catalog, args, global, defaults).await,
        Command::Show(args) => show::handle(catalog, args, global).await,
        Command::Letters(args) => letters::handle(catalog, args, global, defaults).await,
        Command::Manufacturers => manufacturers::handle(catalog, global).await,
        Command::Availability(args) => availability::handle(catalog, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
