//! Availability cell rendering.

use ratatui::text::Span;

use stocklist_core::Availability;

use crate::theme;

/// Styled availability text: colored by stock level, dim while loading.
pub fn availability_span(availability: &Availability) -> Span<'static> {
    let text = match availability {
        Availability::Loading => "loading\u{2026}".to_owned(),
        other => other.to_string(),
    };
    Span::styled(text, theme::stock_style(availability.level()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use stocklist_core::{AvailabilityEntry, FALLBACK_TEXT};

    use super::*;

    #[test]
    fn renders_label_fallback_and_loading() {
        let known = Availability::Known(AvailabilityEntry::new("LESSTHAN10".into()));
        assert_eq!(availability_span(&known).content, "Less than 10");
        assert_eq!(availability_span(&Availability::NotListed).content, FALLBACK_TEXT);
        assert_eq!(availability_span(&Availability::Loading).content, "loading\u{2026}");
    }
}
