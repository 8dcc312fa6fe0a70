//! Shared application state.

use crate::config::AppConfig;
use crate::scrape::{ScrapeError, Site, TeeTimeScraper};

/// State shared across all request handlers.
pub struct AppState {
    /// Scraper holding the outbound HTTP client.
    pub scraper: TeeTimeScraper,
    /// Sites scraped when a request does not name one. Normalized at
    /// startup so a bad allow-list entry fails the boot, not a request.
    pub sites: Vec<Site>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        let sites = config
            .sites
            .iter()
            .map(Site::normalized)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scraper: TeeTimeScraper::with_config(config.scrape.clone())?,
            sites,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_normalizes_allow_list() {
        let config: AppConfig = serde_json::from_str(
            r#"{"sites": [{"name": "Keperra Golf Club", "url": "https://www.keperragolf.com.au/"}]}"#,
        )
        .unwrap();

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.sites.len(), 1);
        assert_eq!(state.sites[0].url, "https://www.keperragolf.com.au");
    }

    #[test]
    fn test_from_config_rejects_bad_allow_list_entry() {
        let config: AppConfig =
            serde_json::from_str(r#"{"sites": [{"url": "not a url"}]}"#).unwrap();

        assert!(matches!(
            AppState::from_config(&config),
            Err(ScrapeError::InvalidUrl { .. })
        ));
    }
}
