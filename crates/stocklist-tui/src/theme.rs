//! Colors and styles shared by every widget.

use ratatui::style::{Color, Modifier, Style};

use stocklist_core::StockLevel;

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(214, 93, 255);
pub const HEADING: Color = Color::Rgb(120, 226, 240);
pub const AMBER: Color = Color::Rgb(245, 200, 90);
pub const STOCK_GREEN: Color = Color::Rgb(96, 220, 130);
pub const ALERT_RED: Color = Color::Rgb(240, 96, 96);
pub const TEXT: Color = Color::Rgb(200, 202, 212);
pub const MUTED: Color = Color::Rgb(110, 118, 150);
pub const SURFACE_RAISED: Color = Color::Rgb(44, 46, 60);
pub const SURFACE: Color = Color::Rgb(28, 29, 38);

// ── Styles ────────────────────────────────────────────────────────────

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

pub fn panel_title() -> Style {
    fg(HEADING).add_modifier(Modifier::BOLD)
}

pub fn frame_active() -> Style {
    fg(ACCENT)
}

pub fn frame_idle() -> Style {
    fg(MUTED)
}

pub fn column_header() -> Style {
    fg(HEADING).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn row() -> Style {
    fg(TEXT)
}

/// The product under the cursor.
pub fn row_cursor() -> Style {
    fg(ACCENT).bg(SURFACE_RAISED).add_modifier(Modifier::BOLD)
}

/// Selected category or letter.
pub fn filter_on() -> Style {
    fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn filter_off() -> Style {
    fg(TEXT)
}

/// Letters the current category has no products under.
pub fn letter_empty() -> Style {
    fg(MUTED).add_modifier(Modifier::DIM)
}

pub fn hint() -> Style {
    fg(MUTED)
}

pub fn hint_key() -> Style {
    fg(HEADING).add_modifier(Modifier::BOLD)
}

/// `None` covers both "still loading" and "not listed by the manufacturer".
pub fn stock_style(level: Option<StockLevel>) -> Style {
    fg(match level {
        Some(StockLevel::InStock) => STOCK_GREEN,
        Some(StockLevel::LessThan10) => AMBER,
        Some(StockLevel::OutOfStock) => ALERT_RED,
        Some(StockLevel::Unknown) => TEXT,
        None => MUTED,
    })
}
