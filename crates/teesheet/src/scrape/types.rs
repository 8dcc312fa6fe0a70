/// Types for the scrape pipeline: sites, fee groups, and booking slots.
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::ScrapeError;

/// A golf club and the base address of its booking portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Display name, e.g. `"Pine Rivers Golf Club"`.
    #[serde(default)]
    pub name: String,

    /// Base address of the booking portal, e.g.
    /// `https://pinerivers.miclub.com.au`.
    pub url: String,
}

impl Site {
    /// Validates and canonicalizes a site record.
    ///
    /// The URL must be absolute http(s) with a host. Trailing slashes are
    /// trimmed so the fixed page paths can be appended verbatim, and an
    /// empty name falls back to the URL's host.
    pub fn normalized(&self) -> Result<Site, ScrapeError> {
        let parsed = Url::parse(self.url.trim()).map_err(|e| ScrapeError::InvalidUrl {
            message: format!("{}: {}", self.url, e),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ScrapeError::InvalidUrl {
                message: format!("{}: unsupported scheme '{}'", self.url, parsed.scheme()),
            });
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| ScrapeError::InvalidUrl {
                message: format!("{}: missing host", self.url),
            })?;

        let name = if self.name.trim().is_empty() {
            host.to_string()
        } else {
            self.name.trim().to_string()
        };

        Ok(Site {
            name,
            url: self.url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Builds a site record from a bare URL, naming it after the host.
    pub fn from_url(url: &str) -> Result<Site, ScrapeError> {
        Site {
            name: String::new(),
            url: url.to_string(),
        }
        .normalized()
    }
}

/// A fee group discovered from calendar markup.
///
/// Identifies one bookable offering (holes count + rate tier) for one date.
/// Lives only for the duration of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeGroup {
    /// Numeric id from the row's `feeGroupId-<digits>` class token.
    pub id: u64,

    /// Holes count implied by the calendar row class (9 or 18).
    pub num_holes: u8,
}

/// One bookable tee time: the unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSlot {
    pub site: Site,

    /// Caller-supplied date string, passed through untouched.
    pub date: String,

    /// 12-hour wall-clock label as shown on the timesheet, e.g. `"7:30 AM"`.
    pub time: String,

    /// Count of individually bookable cells in the row.
    pub slots_available: u32,

    /// Display price; empty when the page showed none.
    pub price: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_holes: Option<u8>,
}
