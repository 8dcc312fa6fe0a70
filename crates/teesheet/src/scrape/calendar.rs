//! Calendar page parsing: discovers the fee groups bookable on a date.
//!
//! The public calendar lists one row per bookable offering; each row's class
//! list carries a `feeGroupId-<digits>` token that keys the matching public
//! timesheet page.

use super::types::FeeGroup;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

// Static selectors for parsing - compiled once
static NINE_HOLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.feeGroupRow.nineHole").unwrap());
static EIGHTEEN_HOLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.feeGroupRow.eighteenHole").unwrap());
static FEE_GROUP_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"feeGroupId-(\d+)").unwrap());

/// Parses a calendar page into the fee groups available for booking.
///
/// Returns groups in document order, 9-hole rows first and 18-hole rows
/// after when `include_eighteen_hole` is set; callers must not attach
/// meaning to that order. A row whose class list lacks a `feeGroupId` token
/// is skipped without faulting the rest of the page.
pub fn parse_fee_groups(html: &str, include_eighteen_hole: bool) -> Vec<FeeGroup> {
    let document = Html::parse_document(html);
    let mut groups = Vec::new();

    collect_groups(&document, &NINE_HOLE_SELECTOR, 9, &mut groups);
    if include_eighteen_hole {
        collect_groups(&document, &EIGHTEEN_HOLE_SELECTOR, 18, &mut groups);
    }

    groups
}

fn collect_groups(document: &Html, selector: &Selector, num_holes: u8, out: &mut Vec<FeeGroup>) {
    for row in document.select(selector) {
        let class_attr = row.value().attr("class").unwrap_or_default();
        match extract_fee_group_id(class_attr) {
            Some(id) => out.push(FeeGroup { id, num_holes }),
            None => debug!(
                class = class_attr,
                "Calendar row without a feeGroupId token, skipping"
            ),
        }
    }
}

/// Pulls the numeric id out of a `feeGroupId-<digits>` class token.
fn extract_fee_group_id(class_attr: &str) -> Option<u64> {
    FEE_GROUP_ID_REGEX
        .captures(class_attr)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR_PAGE: &str = r#"
        <html><body>
            <div class="feeGroupRow nineHole feeGroupId-42">9 Holes Public</div>
            <div class="feeGroupRow nineHole feeGroupId-57">9 Holes Twilight</div>
            <div class="feeGroupRow eighteenHole feeGroupId-91">18 Holes Public</div>
            <div class="feeGroupRow nineHole">Members Only</div>
        </body></html>
    "#;

    #[test]
    fn test_extract_fee_group_id() {
        assert_eq!(
            extract_fee_group_id("feeGroupRow nineHole feeGroupId-42"),
            Some(42)
        );
        assert_eq!(extract_fee_group_id("feeGroupRow nineHole"), None);
    }

    #[test]
    fn test_parses_nine_hole_groups_in_document_order() {
        let groups = parse_fee_groups(CALENDAR_PAGE, false);
        assert_eq!(
            groups,
            vec![
                FeeGroup { id: 42, num_holes: 9 },
                FeeGroup { id: 57, num_holes: 9 },
            ]
        );
    }

    #[test]
    fn test_eighteen_hole_groups_behind_flag() {
        let groups = parse_fee_groups(CALENDAR_PAGE, true);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2], FeeGroup { id: 91, num_holes: 18 });
    }

    #[test]
    fn test_row_without_token_is_skipped() {
        let html = r#"
            <div class="feeGroupRow nineHole">Members Only</div>
            <div class="feeGroupRow nineHole feeGroupId-7">9 Holes Public</div>
        "#;

        let groups = parse_fee_groups(html, false);
        assert_eq!(groups, vec![FeeGroup { id: 7, num_holes: 9 }]);
    }

    #[test]
    fn test_no_matching_markup_yields_empty() {
        let groups = parse_fee_groups("<html><body><p>Closed today</p></body></html>", true);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_unrelated_rows_do_not_match() {
        // Row classes must carry both the feeGroupRow and holes markers.
        let html = r#"<div class="feeGroupRow feeGroupId-10">No holes marker</div>"#;
        assert!(parse_fee_groups(html, true).is_empty());
    }
}
