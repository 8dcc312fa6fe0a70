//! Scraping of bookable tee times from MiClub-style golf booking portals.
//!
//! The portals render their booking state as server-side HTML, so this
//! module answers "which tee times can a visitor book at this club on this
//! date" by fetching and parsing two public pages per site: the calendar
//! (which fee groups exist for the date) and one timesheet per fee group
//! (which rows have open slots).

mod aggregate;
mod calendar;
mod client;
mod config;
mod error;
mod timesheet;
mod types;

pub use client::TeeTimeScraper;
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use types::{BookingSlot, Site};
