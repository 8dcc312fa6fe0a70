//! HTTP client for the booking portals.
//!
//! Owns the outbound `reqwest::Client` and the two-page scrape flow:
//! 1. GET the public calendar for a date and resolve its fee groups
//! 2. GET the public timesheet of each fee group and extract its slots
//! 3. Aggregate every batch into one time-sorted list
//!
//! Fetch failures degrade rather than propagate: a failed calendar empties
//! the site's contribution, a failed timesheet empties that fee group's
//! contribution, and siblings carry on.

use super::aggregate::aggregate;
use super::calendar::parse_fee_groups;
use super::config::ScrapeConfig;
use super::error::ScrapeError;
use super::timesheet::parse_slots;
use super::types::{BookingSlot, FeeGroup, Site};
use futures::stream::{self, StreamExt};
use rand::Rng;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Path of the public calendar page, relative to a site's base URL.
const CALENDAR_PATH: &str = "/guests/bookings/ViewPublicCalendar.msp";

/// Path of the public timesheet page, relative to a site's base URL.
const TIMESHEET_PATH: &str = "/guests/bookings/ViewPublicTimesheet.msp";

/// Client for scraping tee times from MiClub-style booking portals.
pub struct TeeTimeScraper {
    client: Client,
    config: ScrapeConfig,
}

impl TeeTimeScraper {
    /// Creates a scraper from configuration.
    pub fn with_config(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ScrapeError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Scrapes every site for the date and merges the results into one
    /// time-sorted list.
    ///
    /// Per-site and per-fee-group fetch failures degrade to empty
    /// contributions; the only error this returns is an aggregation
    /// failure (a slot whose time label cannot be parsed).
    pub async fn scrape_sites(
        &self,
        sites: &[Site],
        date: &str,
    ) -> Result<Vec<BookingSlot>, ScrapeError> {
        let correlation_id = generate_correlation_id();
        let start = Instant::now();

        let mut batches = Vec::new();
        for site in sites {
            batches.extend(self.collect_site_batches(site, date, &correlation_id).await);
        }

        let slots = aggregate(batches)?;
        info!(
            correlation_id = %correlation_id,
            sites = sites.len(),
            slots = slots.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Scrape completed"
        );

        Ok(slots)
    }

    /// Fetches one site's calendar and timesheets, returning one unsorted
    /// batch per resolved fee group, in resolution order.
    async fn collect_site_batches(
        &self,
        site: &Site,
        date: &str,
        correlation_id: &str,
    ) -> Vec<Vec<BookingSlot>> {
        let groups = self.resolve_fee_groups(site, date, correlation_id).await;

        // `buffered` bounds the in-flight timesheet fetches while keeping
        // batch order equal to resolution order, so tie order in the final
        // sort stays deterministic. The futures are materialized up front
        // (they stay inert until polled) so the borrowing closure is not
        // part of the stream type, which rustc cannot prove `Send`.
        let fetches: Vec<_> = groups
            .iter()
            .map(|group| self.extract_slots(site, date, group, correlation_id))
            .collect();
        stream::iter(fetches)
            .buffered(self.config.fetch_concurrency.max(1))
            .collect::<Vec<_>>()
            .await
    }

    /// Step 1: resolves the fee groups bookable on the date.
    ///
    /// A transport failure and a page with no matching markup both yield an
    /// empty set: from the caller's view there is nothing to book that day.
    async fn resolve_fee_groups(
        &self,
        site: &Site,
        date: &str,
        correlation_id: &str,
    ) -> Vec<FeeGroup> {
        let url = calendar_url(&site.url, date);

        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    correlation_id = %correlation_id,
                    site = %site.name,
                    error = %e,
                    "Calendar fetch failed, site contributes nothing"
                );
                return Vec::new();
            }
        };

        let groups = parse_fee_groups(&html, self.config.include_eighteen_hole);
        if groups.is_empty() {
            warn!(
                correlation_id = %correlation_id,
                site = %site.name,
                date = date,
                "No fee groups on the calendar page"
            );
        } else {
            info!(
                correlation_id = %correlation_id,
                site = %site.name,
                fee_groups = groups.len(),
                "Resolved fee groups"
            );
        }

        groups
    }

    /// Step 2: extracts the booking slots of one fee group's timesheet.
    async fn extract_slots(
        &self,
        site: &Site,
        date: &str,
        group: &FeeGroup,
        correlation_id: &str,
    ) -> Vec<BookingSlot> {
        let url = timesheet_url(&site.url, date, group.id);

        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    correlation_id = %correlation_id,
                    site = %site.name,
                    fee_group_id = group.id,
                    error = %e,
                    "Timesheet fetch failed, fee group contributes nothing"
                );
                return Vec::new();
            }
        };

        parse_slots(&html, site, date, group)
    }

    /// GETs a page, treating any non-success status as a failed fetch.
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScrapeError::Network {
                message: format!("{} returned status {}", url, response.status()),
            });
        }

        Ok(response.text().await?)
    }
}

fn calendar_url(base: &str, date: &str) -> String {
    page_url(base, CALENDAR_PATH, &[("selectedDate", date)])
}

fn timesheet_url(base: &str, date: &str, fee_group_id: u64) -> String {
    page_url(
        base,
        TIMESHEET_PATH,
        &[
            ("selectedDate", date),
            ("feeGroupId", &fee_group_id.to_string()),
        ],
    )
}

/// Appends a fixed page path and an encoded query to a site base URL.
fn page_url(base: &str, path: &str, params: &[(&str, &str)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    format!("{}{}?{}", base.trim_end_matches('/'), path, query.finish())
}

/// Generates a short id tying one scrape's log lines together.
fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
