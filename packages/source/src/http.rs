//! HTTP occurrence source.
//!
//! Issues a single `GET {base_url}/api/occurrences` per load. There is no
//! retry: any transport error, non-success status, or undecodable body is
//! returned to the caller, which falls back to synthetic data.

use async_trait::async_trait;
use eco_migration_occurrence_models::{DatasetOrigin, RawRecord};
use serde::de::DeserializeOwned;

use crate::config::SourceConfig;
use crate::{OccurrenceSource, SourceError};

/// Path of the occurrences endpoint relative to the API base URL.
pub const OCCURRENCES_PATH: &str = "/api/occurrences";

/// Maximum number of characters of the response body included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Fetches occurrence records from the backend API.
pub struct HttpOccurrenceSource {
    client: reqwest::Client,
    url: String,
}

impl HttpOccurrenceSource {
    /// Creates a source for the API at `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            url: occurrences_url(&config.api_url),
        })
    }

    /// The full occurrences URL this source requests.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl OccurrenceSource for HttpOccurrenceSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::Remote
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        log::info!("Fetching occurrences from {}", self.url);
        let records: Vec<RawRecord> = get_json(&self.client, &self.url).await?;
        log::info!("Received {} occurrence records", records.len());
        Ok(records)
    }
}

/// Joins the API base URL and [`OCCURRENCES_PATH`].
#[must_use]
pub fn occurrences_url(base_url: &str) -> String {
    format!("{}{OCCURRENCES_PATH}", base_url.trim_end_matches('/'))
}

/// Sends a GET request and decodes the body as JSON.
///
/// The body is read as text first so a decode failure can be logged with
/// a preview of what the server actually sent.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the status is not a
/// success, or the body cannot be decoded as `T`.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, SourceError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status,
            url: url.to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        log::error!(
            "JSON parse failed.\n  \
             url: {url}\n  \
             status: {status}\n  \
             content-type: {content_type:?}\n  \
             received: {} bytes\n  \
             parse error: {e}\n  \
             body preview: {}",
            text.len(),
            preview(&text),
        );
        SourceError::Json(e)
    })
}

/// Truncates `text` to [`BODY_PREVIEW_LEN`] characters on a char boundary.
fn preview(text: &str) -> String {
    match text.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
