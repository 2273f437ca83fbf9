//! Category tab bar shown above the alphabet filter.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use stocklist_core::Category;

use crate::theme;

/// One line with every category, numbered for the `1`-`3` shortcuts.
///
/// `count` supplies the product count for categories that have loaded;
/// the active category is bracketed and highlighted.
pub fn category_tabs(active: Category, count: impl Fn(Category) -> Option<usize>) -> Line<'static> {
    let mut spans = Vec::with_capacity(Category::all().count() * 2);

    for (i, category) in Category::all().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::hint()));
        }

        let label = match count(category) {
            Some(n) => format!("{} {} ({n})", i + 1, category.title()),
            None => format!("{} {}", i + 1, category.title()),
        };

        if category == active {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::filter_on().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, theme::filter_off()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn brackets_active_and_counts_loaded() {
        let line = category_tabs(Category::Shirts, |c| (c == Category::Jackets).then_some(4));
        assert_eq!(text(&line), "1 Jackets (4)  [2 Shirts]  3 Accessories");
    }
}
