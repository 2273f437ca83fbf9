//! Manufacturer availability handler.

use serde::Serialize;
use tabled::Tabled;

use stocklist_core::{Availability, AvailabilityEntry, Catalog, LoadFailure, StockLevel};

use crate::cli::{AvailabilityArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct AvailabilityView {
    id: String,
    text: String,
    level: StockLevel,
}

#[derive(Tabled)]
struct AvailabilityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Availability")]
    status: String,
}

pub async fn handle(
    catalog: &Catalog,
    args: AvailabilityArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let table = util::with_spinner(
        global,
        &format!("Loading availability for {}...", args.manufacturer),
        catalog.load_availability(&args.manufacturer),
    )
    .await?;

    let views: Vec<AvailabilityView> = table
        .iter()
        .map(|(id, entry)| AvailabilityView {
            id: id.to_owned(),
            text: entry.text.clone(),
            level: entry.level,
        })
        .collect();

    let color = util::color_enabled(global);
    let out = output::render_list(
        global.output.unwrap_or_default(),
        &views,
        |v| AvailabilityRow {
            id: v.id.clone(),
            status: output::availability_cell(
                &Availability::Known(AvailabilityEntry {
                    text: v.text.clone(),
                    level: v.level,
                }),
                color,
            ),
        },
        |v| v.id.clone(),
    );
    output::print_output(&out, global.quiet);

    if table.sentinel {
        output::warn_failure(Some(LoadFailure::Availability), global);
    }
    Ok(())
}
