//! Alphabet filter bar.

use ratatui::text::{Line, Span};

use crate::theme;

/// Letters always offered, even when a category has no products for them.
pub const BASE_LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Render `A`..`Z` plus any extra group letters present in `present`.
///
/// Letters with products are bright; the active letter is bracketed.
pub fn alphabet_bar(present: &[char], active: char) -> Line<'static> {
    let spans = bar_letters(present)
        .into_iter()
        .map(|letter| {
            if letter == active {
                Span::styled(format!("[{letter}]"), theme::filter_on())
            } else if present.contains(&letter) {
                Span::styled(format!(" {letter} "), theme::filter_off())
            } else {
                Span::styled(format!(" {letter} "), theme::letter_empty())
            }
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// The ordered letters the bar shows: `A`..`Z` merged with `present`.
pub fn bar_letters(present: &[char]) -> Vec<char> {
    let mut letters: Vec<char> = BASE_LETTERS.to_vec();
    letters.extend(present.iter().copied().filter(|c| !BASE_LETTERS.contains(c)));
    letters.sort_unstable();
    letters
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extra_group_letters_are_merged_in_order() {
        let letters = bar_letters(&['B', '#', 'Ö']);
        assert_eq!(letters.first(), Some(&'#'));
        assert_eq!(letters.last(), Some(&'Ö'));
        assert_eq!(letters.len(), 28);
    }

    #[test]
    fn active_letter_is_bracketed() {
        let line = alphabet_bar(&['A'], 'C');
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts[0], " A ");
        assert_eq!(texts[2], "[C]");
    }
}
