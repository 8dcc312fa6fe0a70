//! API endpoints for tee time lookups.
//!
//! Both verbs answer the same question, "which tee times are bookable at a
//! club on a date": GET takes query parameters, POST takes a JSON body.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::scrape::{ScrapeError, Site};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Returned with status 200 when a request carries no date, matching the
/// portal-friendly behavior of treating a bare request as a usage probe.
pub const MISSING_DATE_MESSAGE: &str = "Pass a date (and optionally a site) in the query string \
     or request body to search for bookable tee times.";

/// Query parameters for GET /tee_times.
#[derive(Debug, Deserialize)]
pub struct TeeTimeQuery {
    /// Date to search, in the format the booking portal expects.
    pub date: Option<String>,
    /// Base URL of the site to search. Omit to search every configured site.
    pub site: Option<String>,
}

/// JSON body for POST /tee_times.
#[derive(Debug, Deserialize)]
pub struct TeeTimeRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub site: Option<SiteParam>,
}

/// A requested site: either a full descriptor or a bare URL.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SiteParam {
    Descriptor(Site),
    Url(String),
}

/// GET /tee_times
///
/// Query parameters:
/// - `date`: date to search (required for a real lookup)
/// - `site` (optional): base URL of the site to search
pub async fn get_tee_times(
    State(s): State<Arc<AppState>>,
    Query(params): Query<TeeTimeQuery>,
) -> Response {
    info!(
        "GET /tee_times - date={:?} site={:?}",
        params.date, params.site
    );

    lookup_tee_times(&s, params.date, params.site.map(SiteParam::Url)).await
}

/// POST /tee_times
///
/// Accepts the same parameters as GET in a JSON body; `site` may be a bare
/// URL string or a `{"name", "url"}` descriptor.
pub async fn post_tee_times(
    State(s): State<Arc<AppState>>,
    Json(body): Json<TeeTimeRequest>,
) -> Response {
    info!("POST /tee_times - date={:?}", body.date);

    lookup_tee_times(&s, body.date, body.site).await
}

/// Shared lookup behind both verbs.
async fn lookup_tee_times(
    state: &Arc<AppState>,
    date: Option<String>,
    site: Option<SiteParam>,
) -> Response {
    let date = match date {
        Some(date) if !date.trim().is_empty() => date,
        _ => return (StatusCode::OK, MISSING_DATE_MESSAGE).into_response(),
    };

    let sites = match resolve_sites(site, &state.sites) {
        Ok(sites) => sites,
        Err(e) => return e.into_response(),
    };

    match state.scraper.scrape_sites(&sites, &date).await {
        Ok(slots) => (StatusCode::OK, Json(slots)).into_response(),
        Err(e) => {
            error!("Failed to scrape tee times: {}", e);
            scrape_error_to_response(e)
        }
    }
}

/// Decides which sites a request covers.
///
/// A bare URL that matches an allow-list entry borrows that entry's display
/// name; anything else is normalized on the spot. No site plus an empty
/// allow-list cannot be answered and is rejected.
fn resolve_sites(param: Option<SiteParam>, allow_list: &[Site]) -> Result<Vec<Site>, ApiErrorType> {
    match param {
        Some(SiteParam::Descriptor(site)) => match site.normalized() {
            Ok(site) => Ok(vec![site]),
            Err(e) => Err(ApiErrorType::from((
                StatusCode::BAD_REQUEST,
                "Invalid site",
                Some(e.to_string()),
            ))),
        },
        Some(SiteParam::Url(url)) => {
            let trimmed = url.trim_end_matches('/');
            if let Some(known) = allow_list.iter().find(|site| site.url == trimmed) {
                return Ok(vec![known.clone()]);
            }
            match Site::from_url(&url) {
                Ok(site) => Ok(vec![site]),
                Err(e) => Err(ApiErrorType::from((
                    StatusCode::BAD_REQUEST,
                    "Invalid site",
                    Some(e.to_string()),
                ))),
            }
        }
        None if !allow_list.is_empty() => Ok(allow_list.to_vec()),
        None => Err(ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "No site requested and no sites configured",
            None,
        ))),
    }
}

/// Converts a scrape failure to an API response.
fn scrape_error_to_response(error: ScrapeError) -> Response {
    let (status, message) = match &error {
        ScrapeError::UnparseableTime { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "A scraped time label could not be parsed for sorting",
        ),
        ScrapeError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "Invalid site URL"),
        ScrapeError::Network { .. } => (
            StatusCode::BAD_GATEWAY,
            "Failed to reach the booking site",
        ),
    };

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}
