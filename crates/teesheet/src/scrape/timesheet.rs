//! Timesheet page parsing: extracts one booking slot per time row.
//!
//! This is the fragile half of the pipeline. The portal implies a row shape
//! rather than guaranteeing one, so each required field goes through a
//! result that names what was missing instead of assuming the markup holds.

use super::types::{BookingSlot, FeeGroup, Site};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::warn;

/// Secondary-descriptor marker for rows that are not golf bookings.
const FOOT_GOLF_MARKER: &str = "Foot Golf";

static TIME_ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.row.row-time").unwrap());
static TIME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".time-wrapper h3").unwrap());
static DESCRIPTOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".time-wrapper h4").unwrap());
static PRICE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".price").unwrap());
static AVAILABLE_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".cell-available").unwrap());

/// A required field of a time row, used to report malformed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Time,
    Descriptor,
    Price,
}

impl RowField {
    fn as_str(self) -> &'static str {
        match self {
            RowField::Time => "time",
            RowField::Descriptor => "descriptor",
            RowField::Price => "price",
        }
    }
}

/// The text fields of one well-formed time row.
#[derive(Debug, Clone)]
struct TimeRow {
    time: String,
    descriptor: String,
    price: String,
    slots_available: u32,
}

/// Parses a timesheet page into booking slots for one fee group.
///
/// Rows missing a time, descriptor, or price node are skipped with a
/// warning naming the missing field; sibling rows are unaffected. Rows
/// whose descriptor mentions Foot Golf are dropped.
pub fn parse_slots(html: &str, site: &Site, date: &str, group: &FeeGroup) -> Vec<BookingSlot> {
    let document = Html::parse_document(html);
    let mut slots = Vec::new();

    for row in document.select(&TIME_ROW_SELECTOR) {
        let parsed = match parse_time_row(&row) {
            Ok(parsed) => parsed,
            Err(missing) => {
                warn!(
                    fee_group_id = group.id,
                    field = missing.as_str(),
                    "Skipping malformed time row"
                );
                continue;
            }
        };

        if parsed.descriptor.contains(FOOT_GOLF_MARKER) {
            continue;
        }

        slots.push(BookingSlot {
            site: site.clone(),
            date: date.to_string(),
            time: parsed.time,
            slots_available: parsed.slots_available,
            price: parsed.price,
            num_holes: Some(group.num_holes),
        });
    }

    slots
}

/// Extracts the fields of a single row, reporting the first required field
/// whose node is absent. A present-but-empty price node still yields
/// `price: ""`.
fn parse_time_row(row: &ElementRef) -> Result<TimeRow, RowField> {
    let time = select_text(row, &TIME_SELECTOR).ok_or(RowField::Time)?;
    let descriptor = select_text(row, &DESCRIPTOR_SELECTOR).ok_or(RowField::Descriptor)?;
    let price = select_text(row, &PRICE_SELECTOR).ok_or(RowField::Price)?;

    // Each available cell counts for exactly one bookable spot, whatever
    // capacity the cell itself displays.
    let slots_available = row.select(&AVAILABLE_CELL_SELECTOR).count() as u32;

    Ok(TimeRow {
        time,
        descriptor,
        price,
        slots_available,
    })
}

fn select_text(row: &ElementRef, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMESHEET_PAGE: &str = r#"
        <html><body>
            <div class="row row-time">
                <div class="time-wrapper"><h3>7:30 AM</h3><h4>18 Players</h4></div>
                <div class="price">$40</div>
                <div class="cell cell-available"></div>
                <div class="cell cell-available"></div>
                <div class="cell cell-taken"></div>
            </div>
            <div class="row row-time">
                <div class="time-wrapper"><h3>7:38 AM</h3><h4>18 Players</h4></div>
                <div class="price">$40</div>
                <div class="cell cell-taken"></div>
            </div>
        </body></html>
    "#;

    fn test_site() -> Site {
        Site {
            name: "Virginia Golf Club".to_string(),
            url: "https://www.virginiagolf.com.au".to_string(),
        }
    }

    fn nine_hole_group(id: u64) -> FeeGroup {
        FeeGroup { id, num_holes: 9 }
    }

    #[test]
    fn test_parses_one_slot_per_row() {
        let slots = parse_slots(TIMESHEET_PAGE, &test_site(), "2024-06-01", &nine_hole_group(42));

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].time, "7:30 AM");
        assert_eq!(slots[0].price, "$40");
        assert_eq!(slots[0].slots_available, 2);
        assert_eq!(slots[0].num_holes, Some(9));
        assert_eq!(slots[0].date, "2024-06-01");
        assert_eq!(slots[0].site, test_site());
    }

    #[test]
    fn test_fully_booked_row_has_zero_slots() {
        let slots = parse_slots(TIMESHEET_PAGE, &test_site(), "2024-06-01", &nine_hole_group(42));
        assert_eq!(slots[1].slots_available, 0);
    }

    #[test]
    fn test_foot_golf_rows_are_excluded() {
        let html = r#"
            <div class="row row-time">
                <div class="time-wrapper"><h3>9:00 AM</h3><h4>Foot Golf (18 Players)</h4></div>
                <div class="price">$15</div>
                <div class="cell cell-available"></div>
            </div>
            <div class="row row-time">
                <div class="time-wrapper"><h3>9:08 AM</h3><h4>18 Players</h4></div>
                <div class="price">$40</div>
                <div class="cell cell-available"></div>
            </div>
        "#;

        let slots = parse_slots(html, &test_site(), "2024-06-01", &nine_hole_group(42));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time, "9:08 AM");
    }

    #[test]
    fn test_row_missing_time_node_is_skipped() {
        let html = r#"
            <div class="row row-time">
                <div class="time-wrapper"><h4>18 Players</h4></div>
                <div class="price">$40</div>
            </div>
            <div class="row row-time">
                <div class="time-wrapper"><h3>8:00 AM</h3><h4>18 Players</h4></div>
                <div class="price">$40</div>
            </div>
        "#;

        let slots = parse_slots(html, &test_site(), "2024-06-01", &nine_hole_group(42));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time, "8:00 AM");
    }

    #[test]
    fn test_row_missing_price_node_is_skipped() {
        let html = r#"
            <div class="row row-time">
                <div class="time-wrapper"><h3>8:00 AM</h3><h4>18 Players</h4></div>
            </div>
        "#;

        assert!(parse_slots(html, &test_site(), "2024-06-01", &nine_hole_group(42)).is_empty());
    }

    #[test]
    fn test_empty_price_node_yields_empty_price() {
        let html = r#"
            <div class="row row-time">
                <div class="time-wrapper"><h3>8:00 AM</h3><h4>18 Players</h4></div>
                <div class="price"> </div>
                <div class="cell cell-available"></div>
            </div>
        "#;

        let slots = parse_slots(html, &test_site(), "2024-06-01", &nine_hole_group(42));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].price, "");
    }

    #[test]
    fn test_page_without_rows_yields_empty() {
        let slots = parse_slots(
            "<html><body><p>No times available</p></body></html>",
            &test_site(),
            "2024-06-01",
            &nine_hole_group(42),
        );
        assert!(slots.is_empty());
    }
}
