//! Manufacturer listing handler.
//!
//! Manufacturers are derived from the accessories category only.

use serde::Serialize;
use tabled::Tabled;

use stocklist_core::{Catalog, Category};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Clone, Serialize, Tabled)]
struct ManufacturerRow {
    #[tabled(rename = "Manufacturer")]
    name: String,
    #[tabled(rename = "Accessories")]
    accessories: usize,
}

pub async fn handle(catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    let accessories = util::with_spinner(
        global,
        "Loading accessories...",
        catalog.load_category(Category::Accessories),
    )
    .await?;

    let rows: Vec<ManufacturerRow> = catalog
        .manufacturers()
        .iter()
        .map(|name| ManufacturerRow {
            name: name.clone(),
            accessories: accessories
                .iter_products()
                .filter(|p| &p.manufacturer == name)
                .count(),
        })
        .collect();

    let out = output::render_list(
        global.output.unwrap_or_default(),
        &rows,
        ManufacturerRow::clone,
        |r| r.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
