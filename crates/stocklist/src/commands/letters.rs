//! Alphabet filter handler.

use serde::Serialize;
use tabled::Tabled;

use stocklist_core::Catalog;

use crate::cli::{GlobalOpts, LettersArgs};
use crate::config::{self, Defaults};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Clone, Serialize, Tabled)]
struct LetterRow {
    #[tabled(rename = "Letter")]
    letter: char,
    #[tabled(rename = "Products")]
    products: usize,
}

pub async fn handle(
    catalog: &Catalog,
    args: LettersArgs,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    let category = config::resolve_category(args.category.as_deref(), defaults)?;
    let grouped = util::with_spinner(
        global,
        &format!("Loading {category}..."),
        catalog.load_category(category),
    )
    .await?;

    let rows: Vec<LetterRow> = grouped
        .groups()
        .map(|g| LetterRow {
            letter: g.letter,
            products: g.products.len(),
        })
        .collect();

    let out = output::render_list(
        global.output.unwrap_or_default(),
        &rows,
        LetterRow::clone,
        |r| r.letter.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
