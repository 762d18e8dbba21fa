//! RKD record API client
//!
//! Defines the client trait and response types for looking up excerpt
//! records. Two implementations:
//! - `HttpRecordClient`: `GET {base_url}/{key}?format=json` over reqwest (production)
//! - `MockRecordClient`: returns preconfigured responses (testing)
//!
//! [`fetch_with_retry`] wraps any client in the bounded retry policy:
//! at most two attempts with a fixed wait in between, then the record is
//! treated as absent.

use crate::config::RecordApiConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum lookups per record (first attempt plus one retry)
pub const MAX_ATTEMPTS: usize = 2;

/// Body of a record lookup: `{response: {docs: [{picturae_images: [...]}]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub response: RecordBody,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordBody {
    #[serde(default)]
    pub docs: Vec<RecordDoc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordDoc {
    #[serde(default)]
    pub picturae_images: Vec<String>,
}

impl RecordResponse {
    /// Image identifiers of the first document, if any
    pub fn image_ids(&self) -> &[String] {
        self.response
            .docs
            .first()
            .map(|d| d.picturae_images.as_slice())
            .unwrap_or(&[])
    }
}

/// Errors from record lookups. All of them are treated as transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record API unreachable: {0}")]
    Transport(String),
    #[error("record API returned status {0}")]
    Status(u16),
    #[error("malformed record response: {0}")]
    Malformed(String),
}

/// Client trait for the record API.
///
/// Abstracts over transport (HTTP, mock) so the enrichment pass doesn't
/// depend on how records are reached.
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// Look up one record by key
    async fn fetch(&self, key: &str) -> Result<RecordResponse, RecordError>;
}

/// Outcome of a lookup after the retry policy has run
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(RecordResponse),
    Absent,
}

/// Look up a record with at most [`MAX_ATTEMPTS`] attempts, waiting `delay`
/// before the retry. Never fails: exhausted attempts yield [`Lookup::Absent`].
pub async fn fetch_with_retry(client: &dyn RecordClient, key: &str, delay: Duration) -> Lookup {
    for attempt in 1..=MAX_ATTEMPTS {
        match client.fetch(key).await {
            Ok(record) => {
                debug!(key, attempt, "record found");
                return Lookup::Found(record);
            }
            Err(e) if attempt < MAX_ATTEMPTS => {
                warn!(key, error = %e, "record lookup failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!(key, error = %e, "record lookup failed, skipping resource");
            }
        }
    }
    Lookup::Absent
}

/// reqwest-backed client for the public record API
pub struct HttpRecordClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordClient {
    pub fn new(config: &RecordApiConfig) -> Result<Self, RecordError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RecordError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn fetch(&self, key: &str) -> Result<RecordResponse, RecordError> {
        let url = format!("{}/{}", self.base_url, key);
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecordError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| RecordError::Malformed(e.to_string()))
    }
}

/// Mock client for testing — replays preconfigured responses per key.
///
/// Responses are consumed in order; the last one registered for a key
/// repeats. Unknown keys fail with a transport error.
#[derive(Default)]
pub struct MockRecordClient {
    responses: Mutex<HashMap<String, VecDeque<Result<RecordResponse, RecordError>>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockRecordClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for a key
    pub fn with_response(self, key: impl Into<String>, response: RecordResponse) -> Self {
        self.push(key.into(), Ok(response));
        self
    }

    /// Queue a failure for a key
    pub fn with_failure(self, key: impl Into<String>, error: RecordError) -> Self {
        self.push(key.into(), Err(error));
        self
    }

    /// How many times `key` was looked up
    pub fn calls(&self, key: &str) -> usize {
        self.calls
            .lock()
            .map(|c| c.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn push(&self, key: String, outcome: Result<RecordResponse, RecordError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.entry(key).or_default().push_back(outcome);
        }
    }
}

#[async_trait]
impl RecordClient for MockRecordClient {
    async fn fetch(&self, key: &str) -> Result<RecordResponse, RecordError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(key.to_string()).or_default() += 1;
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| RecordError::Transport("mock state poisoned".to_string()))?;
        match responses.get_mut(key) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(RecordError::Transport("empty mock queue".to_string()))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(RecordError::Transport("empty mock queue".to_string()))),
            None => Err(RecordError::Transport(format!(
                "no mock response for record '{}'",
                key
            ))),
        }
    }
}

/// Helper to construct a RecordResponse for testing.
pub fn mock_record(image_ids: &[&str]) -> RecordResponse {
    RecordResponse {
        response: RecordBody {
            docs: vec![RecordDoc {
                picturae_images: image_ids.iter().map(|s| s.to_string()).collect(),
            }],
        },
    }
}
