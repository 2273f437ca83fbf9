//! Single product detail handler.

use std::fmt::Write;

use stocklist_core::{Catalog, CoreError};

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;

use super::products::ProductView;
use super::util;

/// The expanded-product panel, as plain text.
fn detail(view: &ProductView<'_>, color: bool) -> String {
    let p = view.product;
    let mut out = String::new();
    let _ = writeln!(out, "{}", p.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "ID:            {}", p.id);
    let _ = writeln!(out, "Type:          {}", p.product_type);
    let _ = writeln!(out, "Price:         {}", p.price_label());
    let _ = writeln!(out, "Manufacturer:  {}", p.manufacturer);
    let _ = writeln!(
        out,
        "Availability:  {}",
        output::availability_cell(&view.resolved, color)
    );
    let _ = write!(out, "Colors:        {}", p.colors_label());
    out
}

pub async fn handle(catalog: &Catalog, args: ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut report = util::load_catalog(catalog, global).await;

    let Some((category, product)) = catalog.find_product(&args.id) else {
        // The product may live in a category that failed to load.
        if let Some((_, err)) = report.errors.drain(..).next() {
            return Err(err.into());
        }
        return Err(CoreError::ProductNotFound {
            identifier: args.id,
        }
        .into());
    };

    let table = catalog.availability();
    let view = ProductView::new(&product, category, &table);
    let color = util::color_enabled(global);
    let out = output::render_single(
        global.output.unwrap_or_default(),
        &view,
        |v| detail(v, color),
        |v| v.product.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    output::warn_failure(catalog.failure(), global);
    Ok(())
}
