//! Turning command results into text for `--output`.
//!
//! Tables go through `tabled`. JSON and YAML serialize the view structs
//! directly, so their field names are the machine-readable contract.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use stocklist_core::{Availability, LoadFailure, StockLevel};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color ────────────────────────────────────────────────────────────

/// `NO_COLOR` only matters in auto mode.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Availability text, colored by stock level when `color` is set.
pub fn availability_cell(availability: &Availability, color: bool) -> String {
    let text = availability.to_string();
    if !color {
        return text;
    }
    match availability {
        Availability::Known(entry) => match entry.level {
            StockLevel::InStock => text.green().to_string(),
            StockLevel::LessThan10 => text.yellow().to_string(),
            StockLevel::OutOfStock => text.red().to_string(),
            StockLevel::Unknown => text,
        },
        Availability::Loading | Availability::NotListed => text.dimmed().to_string(),
    }
}

// ── Formats ──────────────────────────────────────────────────────────

/// A collection: `to_row` projects each item for the table, `id_fn`
/// gives its line in plain mode. Structured formats serialize `data`.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// One record. In table mode `detail_fn` lays it out as labelled lines.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Nothing is printed under `--quiet` or for an empty result.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    // A closed pipe (`| head`) is not an error worth reporting.
    let _ = writeln!(io::stdout().lock(), "{output}");
}

/// Color decision for one invocation: the resolved `--color`, falling
/// back to auto-detection.
pub fn color_for(global: &GlobalOpts) -> bool {
    should_color(global.color.unwrap_or_default())
}

/// Report a partial load on stderr with the user-facing message.
pub fn warn_failure(failure: Option<LoadFailure>, global: &GlobalOpts) {
    let Some(failure) = failure else { return };
    if !global.quiet {
        eprintln!("{}", warning_line(failure, color_for(global)));
    }
}

fn warning_line(failure: LoadFailure, color: bool) -> String {
    if color {
        format!("{} {}", "warning:".yellow().bold(), failure.message())
    } else {
        format!("warning: {}", failure.message())
    }
}

// ── Encoders ─────────────────────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let encoded = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    encoded.unwrap_or_else(|e| format!("{{\"error\": \"cannot encode JSON: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: cannot encode YAML: {e}"))
}
