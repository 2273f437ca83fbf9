// ── Availability payload parsing ──
//
// DATAPAYLOAD values are small XML fragments such as
// `<AVAILABILITY><CODE>200</CODE><INSTOCKVALUE>INSTOCK</INSTOCKVALUE></AVAILABILITY>`.
// Only the text content matters, so tags are stripped rather than parsed.

use stocklist_api::AvailabilityRecord;

use crate::model::{AvailabilityEntry, ManufacturerAvailability};

/// Shown when a payload is absent or a product is missing from its
/// manufacturer's table.
pub const FALLBACK_TEXT: &str = "information not available";

/// Remove every `<...>` tag from `payload`.
///
/// A `<` starts a tag when at least one character follows it before the
/// next `>`; a tag left open at the end of the input runs to the end.
/// A bare `<>` or a lone trailing `<` is kept as text. Absent or empty
/// payloads yield [`FALLBACK_TEXT`].
pub fn strip_markup(payload: Option<&str>) -> String {
    let Some(input) = payload.filter(|p| !p.is_empty()) else {
        return FALLBACK_TEXT.to_owned();
    };

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(0) => {
                out.push('<');
                rest = after;
            }
            Some(close) => rest = &after[close + 1..],
            None if after.is_empty() => {
                out.push('<');
                rest = after;
            }
            None => rest = "",
        }
    }
    out.push_str(rest);
    out
}

/// Collapse whitespace runs (including newlines) to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flatten availability records into a lookup table keyed by uppercase id.
pub fn availability_map<'a, I>(records: I) -> ManufacturerAvailability
where
    I: IntoIterator<Item = &'a AvailabilityRecord>,
{
    let mut table = ManufacturerAvailability::default();
    for record in records {
        let text = collapse_whitespace(&strip_markup(record.payload.as_deref()));
        table.insert(&record.id, AvailabilityEntry::new(text));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, StockLevel};

    #[test]
    fn strips_all_tags() {
        let payload = "<AVAILABILITY>\n  <CODE>200</CODE>\n  <INSTOCKVALUE>OUTOFSTOCK</INSTOCKVALUE>\n</AVAILABILITY>";
        let stripped = strip_markup(Some(payload));
        assert!(!stripped.contains('<'));
        assert!(!stripped.contains('>'));
        assert_eq!(collapse_whitespace(&stripped), "200 OUTOFSTOCK");
    }

    #[test]
    fn absent_or_empty_payload_is_fallback() {
        assert_eq!(strip_markup(None), FALLBACK_TEXT);
        assert_eq!(strip_markup(Some("")), FALLBACK_TEXT);
    }

    #[test]
    fn unterminated_tag_runs_to_end() {
        assert_eq!(strip_markup(Some("IN<STOCK")), "IN");
        assert_eq!(strip_markup(Some("a<b<c>d")), "ad");
    }

    #[test]
    fn empty_brackets_and_trailing_lt_are_kept() {
        assert_eq!(strip_markup(Some("a<>b")), "a<>b");
        assert_eq!(strip_markup(Some("less <")), "less <");
        assert_eq!(strip_markup(Some("plain text")), "plain text");
    }

    #[test]
    fn closing_slash_alone_is_a_tag() {
        assert_eq!(strip_markup(Some("x</>y")), "xy");
    }

    #[test]
    fn availability_map_keys_uppercase() {
        let records = vec![
            AvailabilityRecord {
                id: "abc".into(),
                payload: Some("<X>\n<V>INSTOCK</V></X>".into()),
            },
            AvailabilityRecord {
                id: "DEF".into(),
                payload: None,
            },
        ];
        let table = availability_map(&records);

        assert_eq!(table.len(), 2);
        let abc = table.get(&ProductId::from("ABC")).map(|e| e.level);
        assert_eq!(abc, Some(StockLevel::InStock));
        let def = table.get(&ProductId::from("def")).map(|e| e.text.as_str());
        assert_eq!(def, Some(FALLBACK_TEXT));
    }

    #[test]
    fn later_duplicate_id_wins() {
        let records = vec![
            AvailabilityRecord {
                id: "A".into(),
                payload: Some("<V>INSTOCK</V>".into()),
            },
            AvailabilityRecord {
                id: "a".into(),
                payload: Some("<V>OUTOFSTOCK</V>".into()),
            },
        ];
        let table = availability_map(&records);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(&ProductId::from("a")).map(|e| e.level),
            Some(StockLevel::OutOfStock)
        );
    }
}
