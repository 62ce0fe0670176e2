//! Gateway client for the bacteria prediction backend.
//!
//! Every operation returns either the backend's response envelope (list/get)
//! or a normalized [`PredictionResult`] (predict), and fails with a single
//! [`ApiError`] carrying the HTTP status and whatever payload the backend
//! attached. Transport failures with no response at all surface as status
//! 500. The gateway never retries.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::bacteria::{BacteriaRecord, FilterCriteria, PredictionRequest, PredictionResult};
use crate::config::Settings;
use crate::http_client;
use crate::normalize;

const MAX_PREDICT_RESPONSE_BYTES: usize = 256 * 1024;
const MAX_LIST_RESPONSE_BYTES: usize = 1024 * 1024;
const MAX_RECORD_RESPONSE_BYTES: usize = 64 * 1024;

/// Status used when no HTTP response was received at all.
const TRANSPORT_STATUS: u16 = 500;

/// The one error shape remote failures collapse into.
#[derive(Debug, Clone, thiserror::Error)]
#[error("HTTP {status}: {message}")]
pub struct ApiError {
    /// HTTP status code, or 500 when the backend was unreachable.
    pub status: u16,
    /// Human-readable summary, preferring the backend's error detail.
    pub message: String,
    /// Raw error payload when the backend sent one.
    pub payload: Option<serde_json::Value>,
}

impl ApiError {
    fn from_status(status: u16, body: Option<String>) -> Self {
        let payload = body
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .and_then(|text| serde_json::from_str(text).ok());
        let message = payload
            .as_ref()
            .and_then(payload_detail)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self {
            status,
            message,
            payload,
        }
    }

    fn transport(message: impl Into<String>) -> Self {
        Self {
            status: TRANSPORT_STATUS,
            message: message.into(),
            payload: None,
        }
    }

    /// Message suitable for a status bar or banner.
    pub fn detail(&self) -> &str {
        &self.message
    }
}

/// Dig the most specific message out of an error payload.
///
/// The backend wraps failures as `{error: {detail}}` inside its envelope,
/// while framework-level errors arrive as a bare `{detail}`.
fn payload_detail(payload: &serde_json::Value) -> Option<String> {
    let candidates = [
        payload.pointer("/error/detail"),
        payload.get("detail"),
        payload.get("message"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(|value| value.as_str())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Response wrapper shared by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Error block inside an envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: String,
}

/// Server-declared pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_previous: bool,
    #[serde(default)]
    pub has_next: bool,
}

/// Parameters for the list operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub filters: FilterCriteria,
}

/// Blocking client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    /// Submit traits for prediction and return the normalized result.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
        let url = self.endpoint_url(&["predictions", "predict"])?;
        let response = match http_client::agent()
            .post(url.as_str())
            .set("Accept", "application/json")
            .send_json(request)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_best_effort(response, MAX_PREDICT_RESPONSE_BYTES);
                return Err(ApiError::from_status(code, body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(ApiError::transport(err.to_string()));
            }
        };

        let envelope: Envelope<PredictionResult> =
            parse_envelope(response, MAX_PREDICT_RESPONSE_BYTES)?;
        let data = envelope.data.ok_or_else(|| {
            ApiError::transport("Prediction response carried no data payload")
        })?;
        Ok(normalize::normalize_prediction_result(data))
    }

    /// Fetch one catalog page. The envelope is returned as the backend sent
    /// it; pagination metadata stays in `meta`.
    pub fn list_bacteria(
        &self,
        query: &ListQuery,
    ) -> Result<Envelope<Vec<BacteriaRecord>>, ApiError> {
        let url = self.list_url(query)?;
        self.get_envelope(url, MAX_LIST_RESPONSE_BYTES)
    }

    /// Fetch one record by its surrogate numeric id.
    pub fn bacteria_by_id(&self, id: i64) -> Result<Envelope<BacteriaRecord>, ApiError> {
        let url = self.endpoint_url(&["bacteria", &id.to_string()])?;
        self.get_envelope(url, MAX_RECORD_RESPONSE_BYTES)
    }

    /// Fetch one record by its natural key.
    pub fn bacteria_by_natural_key(
        &self,
        natural_key: &str,
    ) -> Result<Envelope<BacteriaRecord>, ApiError> {
        let url = self.endpoint_url(&["bacteria", "search", "id", natural_key])?;
        self.get_envelope(url, MAX_RECORD_RESPONSE_BYTES)
    }

    fn get_envelope<T: DeserializeOwned + Default>(
        &self,
        url: Url,
        max_bytes: usize,
    ) -> Result<Envelope<T>, ApiError> {
        let response = match http_client::agent().get(url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_best_effort(response, max_bytes);
                return Err(ApiError::from_status(code, body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(ApiError::transport(err.to_string()));
            }
        };
        parse_envelope(response, max_bytes)
    }

    /// Build the list URL. Empty filter fields are omitted entirely;
    /// `is_pathogen` appears as a literal boolean only when explicitly set.
    pub(crate) fn list_url(&self, query: &ListQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint_url(&["bacteria"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("page_size", &query.page_size.to_string());
            if let Some(search) = trimmed(&query.filters.search) {
                pairs.append_pair("search", search);
            }
            if let Some(is_pathogen) = query.filters.is_pathogen {
                pairs.append_pair("is_pathogen", if is_pathogen { "true" } else { "false" });
            }
            if let Some(gram_stain) = trimmed(&query.filters.gram_stain) {
                pairs.append_pair("gram_stain", gram_stain);
            }
            if let Some(phylum) = trimmed(&query.filters.phylum) {
                pairs.append_pair("phylum", phylum);
            }
        }
        Ok(url)
    }

    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            ApiError::transport(format!("Invalid backend base URL {:?}: {err}", self.base_url))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ApiError::transport(format!(
                    "Backend base URL {:?} cannot carry a path",
                    self.base_url
                ))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn parse_envelope<T: DeserializeOwned + Default>(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Envelope<T>, ApiError> {
    let bytes = http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| ApiError::transport(err.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|err| ApiError::transport(err.to_string()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::transport("Empty response body"));
    }
    serde_json::from_str(trimmed)
        .map_err(|err| ApiError::transport(format!("Malformed response envelope: {err}")))
}

fn read_body_best_effort(response: ureq::Response, max_bytes: usize) -> Option<String> {
    let bytes = http_client::read_response_bytes(response, max_bytes).ok()?;
    String::from_utf8(bytes).ok()
}
