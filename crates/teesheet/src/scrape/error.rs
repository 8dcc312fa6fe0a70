//! Error types for the scrape pipeline.

use thiserror::Error;

/// Errors that can occur while scraping a booking portal.
#[derive(Debug, Error, Clone)]
pub enum ScrapeError {
    /// Network/HTTP request failed (DNS, connect, timeout, non-2xx status)
    #[error("Network error: {message}")]
    Network { message: String },

    /// A site base URL that cannot be scraped against
    #[error("Invalid site URL: {message}")]
    InvalidUrl { message: String },

    /// A slot's time label did not parse as a 12-hour wall-clock time
    #[error("Unparseable time label {value:?}")]
    UnparseableTime { value: String },
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Network {
            message: err.to_string(),
        }
    }
}
