//! Merging and ordering of extracted slots.

use super::error::ScrapeError;
use super::types::BookingSlot;
use chrono::NaiveTime;

/// Wall-clock format of the portal's time labels, e.g. `7:30 AM`.
const TIME_FORMAT: &str = "%I:%M %p";

/// Merges per-fee-group batches into one list sorted ascending by time.
///
/// Batches are concatenated in resolution order and the sort is stable, so
/// slots sharing a time keep their relative input order. Any slot whose
/// time label does not parse fails the whole aggregation.
pub fn aggregate(batches: Vec<Vec<BookingSlot>>) -> Result<Vec<BookingSlot>, ScrapeError> {
    let mut keyed: Vec<(NaiveTime, BookingSlot)> = batches
        .into_iter()
        .flatten()
        .map(|slot| parse_slot_time(&slot.time).map(|time| (time, slot)))
        .collect::<Result<_, _>>()?;

    keyed.sort_by_key(|(time, _)| *time);

    Ok(keyed.into_iter().map(|(_, slot)| slot).collect())
}

/// Parses a slot's 12-hour time label into a sortable time of day.
fn parse_slot_time(value: &str) -> Result<NaiveTime, ScrapeError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| ScrapeError::UnparseableTime {
        value: value.to_string(),
    })
}
