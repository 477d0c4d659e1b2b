// =============================================================================
// source.rs — THE ONE AND ONLY FETCH
// =============================================================================
//
// The spreadsheet web app answers a plain GET with a JSON array, one object
// per row, keys being the column headers. No pagination, no auth, no query
// string. We ask once per run; if it fails, the run reports it and that's
// the end of it. No retries, no circuit breaker, no partial results.
//
// Failure modes, all surfaced as LoadError:
//   - the request never completes (DNS, TLS, connection reset, timeout)
//   - the server answers with a non-2xx status
//   - the body isn't JSON
//   - the body is JSON but not an array
//
// An empty array is a perfectly good answer: zero trips, no error.
// =============================================================================

use std::time::Instant;

use reqwest::StatusCode;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::metrics::IngestMetrics;
use crate::models::{RawRecord, TripRecord};
use crate::normalize::Normalizer;

/// Message shown to the user whenever the load fails, whatever the cause.
pub const LOAD_FAILED_MESSAGE: &str = "Erro ao carregar dados.";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request itself failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered, but not with success.
    #[error("Endpoint answered with status {0}")]
    Status(StatusCode),

    /// The body wasn't JSON.
    #[error("Response body is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON, but not the array of rows we expect.
    #[error("Expected a JSON array of rows, got {0}")]
    UnexpectedShape(&'static str),
}

/// HTTP client configured from `Config`.
pub fn build_client(config: &Config) -> Result<reqwest::Client, LoadError> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// GET the endpoint and decode its body into raw rows.
pub async fn fetch_raw_records(
    client: &reqwest::Client,
    config: &Config,
) -> Result<Vec<RawRecord>, LoadError> {
    debug!(url = %config.endpoint_url, "Requesting trip spreadsheet");

    let response = client
        .get(config.endpoint_url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }

    let body = response.text().await?;
    decode_rows(&body)
}

/// Decode a response body into rows. Array elements that aren't objects
/// still become (empty) rows so the row count is preserved.
pub fn decode_rows(body: &str) -> Result<Vec<RawRecord>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(RawRecord::from).collect()),
        serde_json::Value::Object(_) => Err(LoadError::UnexpectedShape("an object")),
        serde_json::Value::String(_) => Err(LoadError::UnexpectedShape("a string")),
        serde_json::Value::Number(_) => Err(LoadError::UnexpectedShape("a number")),
        serde_json::Value::Bool(_) => Err(LoadError::UnexpectedShape("a boolean")),
        serde_json::Value::Null => Err(LoadError::UnexpectedShape("null")),
    }
}

/// Fetch and normalize in one go, recording how the fetch went.
pub async fn load_trips(
    client: &reqwest::Client,
    config: &Config,
    normalizer: &Normalizer,
    metrics: &IngestMetrics,
) -> Result<Vec<TripRecord>, LoadError> {
    let started = Instant::now();
    let fetched = fetch_raw_records(client, config).await;
    metrics.record_fetch(started.elapsed(), fetched.is_ok());

    match fetched {
        Ok(rows) => {
            info!(
                rows = rows.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Trip spreadsheet fetched"
            );
            Ok(normalizer.map_rows(rows))
        }
        Err(e) => {
            error!(error = %e, url = %config.endpoint_url, "Failed to load trip spreadsheet");
            Err(e)
        }
    }
}
