//! Product listing handler.

use serde::Serialize;
use tabled::Tabled;

use stocklist_core::{
    Availability, AvailabilityTable, Catalog, Category, CoreError, GroupedCatalog, Product,
    StockLevel,
};

use crate::cli::{GlobalOpts, ProductsArgs};
use crate::config::{self, Defaults};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Serializable view ───────────────────────────────────────────────

/// A product joined with its availability, as emitted by JSON/YAML output.
#[derive(Serialize)]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub category: Category,
    pub availability: String,
    pub stock_level: Option<StockLevel>,
    #[serde(skip)]
    pub resolved: Availability,
}

impl<'a> ProductView<'a> {
    pub fn new(product: &'a Product, category: Category, table: &AvailabilityTable) -> Self {
        let resolved = table.lookup(&product.manufacturer, &product.id);
        Self {
            product,
            category,
            availability: resolved.to_string(),
            stock_level: resolved.level(),
            resolved,
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "")]
    letter: char,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "Availability")]
    availability: String,
}

impl ProductRow {
    fn from_view(view: &ProductView<'_>, color: bool) -> Self {
        Self {
            letter: view.product.group_letter(),
            id: view.product.id.to_string(),
            name: view.product.name.clone(),
            price: view.product.price_label(),
            manufacturer: view.product.manufacturer.clone(),
            availability: output::availability_cell(&view.resolved, color),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ProductsArgs,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    let category = config::resolve_category(args.category.as_deref(), defaults)?;
    let mut report = util::load_catalog(catalog, global).await;

    if let Some(err) = report.take_category_error(category) {
        return Err(err.into());
    }
    let grouped = catalog.grouped(category).ok_or_else(|| CoreError::Api {
        message: format!("no data for {category}"),
        status: None,
    })?;

    let table = catalog.availability();
    let views: Vec<ProductView<'_>> = match args.letter {
        Some(letter) => grouped
            .products_for(letter_key(&grouped, letter))
            .iter()
            .map(|p| ProductView::new(p, category, &table))
            .collect(),
        None => grouped
            .iter_products()
            .map(|p| ProductView::new(p, category, &table))
            .collect(),
    };

    let color = util::color_enabled(global);
    let out = output::render_list(
        global.output.unwrap_or_default(),
        &views,
        |v| ProductRow::from_view(v, color),
        |v| v.product.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    output::warn_failure(catalog.failure(), global);
    Ok(())
}

/// Groups are keyed by the name's first character as written. `-l b`
/// still finds `B...` unless some name really starts with `b`.
fn letter_key(grouped: &GroupedCatalog, letter: char) -> char {
    if grouped.group(letter).is_some() {
        letter
    } else {
        letter.to_ascii_uppercase()
    }
}
