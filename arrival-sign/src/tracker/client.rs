//! Train Tracker HTTP client.
//!
//! Fetches the arrivals board for one station and validates the response
//! envelope. Record-level validation is left to
//! [`resolve_batch`](super::resolve_batch).

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::domain::MapId;

use super::convert::TIMESTAMP_FORMAT;
use super::error::FeedError;
use super::types::{ArrivalsResponse, RawArrival};

/// Default base URL for the Train Tracker API.
const DEFAULT_BASE_URL: &str = "https://lapi.transitchicago.com/api/1.0";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A validated arrivals response.
#[derive(Debug, Clone)]
pub struct Arrivals {
    /// When the feed generated the response, if it said.
    pub timestamp: Option<NaiveDateTime>,

    /// Raw prediction records, unvalidated.
    pub records: Vec<RawArrival>,

    /// The response body as received.
    pub body: String,
}

/// Something that can produce an arrivals board for a station.
pub trait ArrivalsSource {
    /// Fetch the current arrivals for a station.
    fn fetch_arrivals(
        &self,
        map_id: MapId,
    ) -> impl Future<Output = Result<Arrivals, FeedError>> + Send;
}

/// Validate an arrivals response body.
///
/// Checks the `ctatt` envelope and its error code; records are passed
/// through as-is.
pub fn parse_arrivals(body: String) -> Result<Arrivals, FeedError> {
    let response: ArrivalsResponse = match serde_json::from_str(&body) {
        Ok(response) => response,
        Err(e) => {
            return Err(FeedError::Json {
                message: e.to_string(),
                body,
            });
        }
    };

    let Some(envelope) = response.ctatt else {
        return Err(FeedError::MissingEnvelope { body });
    };

    let code = match envelope.error_code.as_deref().map(|c| c.trim().parse::<u32>()) {
        Some(Ok(code)) => code,
        Some(Err(_)) | None => {
            return Err(FeedError::Json {
                message: format!("invalid errCd: {:?}", envelope.error_code),
                body,
            });
        }
    };
    if code != 0 {
        return Err(FeedError::Api {
            code,
            name: envelope.error_name.unwrap_or_default(),
            body,
        });
    }

    let timestamp = envelope.timestamp.as_deref().and_then(|tmst| {
        NaiveDateTime::parse_from_str(tmst, TIMESTAMP_FORMAT)
            .inspect_err(|e| warn!(tmst, error = %e, "unparseable feed timestamp"))
            .ok()
    });

    Ok(Arrivals {
        timestamp,
        records: envelope.eta,
        body,
    })
}

/// Configuration for the Train Tracker client.
#[derive(Debug, Clone)]
pub struct TrainTrackerConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TrainTrackerConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Train Tracker API client.
#[derive(Debug, Clone)]
pub struct TrainTrackerClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TrainTrackerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TrainTrackerConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ArrivalsSource for TrainTrackerClient {
    async fn fetch_arrivals(&self, map_id: MapId) -> Result<Arrivals, FeedError> {
        let url = format!("{}/ttarrivals.aspx", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.clone()),
                ("mapid", map_id.to_string()),
                ("outputType", "JSON".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_arrivals(body)
    }
}
