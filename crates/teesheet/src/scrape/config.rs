//! Tuning knobs for the scrape pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for the tee time scraper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Also resolve 18-hole fee groups from the calendar page.
    #[serde(default)]
    pub include_eighteen_hole: bool,

    /// Maximum in-flight timesheet fetches per request.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Connect timeout per outbound fetch, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Total timeout per outbound fetch, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_fetch_concurrency() -> usize {
    4
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            include_eighteen_hole: false,
            fetch_concurrency: default_fetch_concurrency(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}
