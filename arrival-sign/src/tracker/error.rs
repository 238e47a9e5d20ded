//! Train Tracker client error types.

use std::path::PathBuf;

/// Errors fetching or validating an arrivals response.
///
/// Every variant raised after a body was received keeps that body so the
/// caller can persist it for later diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("feed returned HTTP {status}")]
    Status { status: u16, body: String },

    /// Body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String, body: String },

    /// Body parsed but had no `ctatt` envelope
    #[error("response has no ctatt envelope")]
    MissingEnvelope { body: String },

    /// The feed reported an error in the envelope
    #[error("feed error {code}: {name}")]
    Api {
        code: u32,
        name: String,
        body: String,
    },

    /// Mock data could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    /// The raw response body, when one was received.
    pub fn payload(&self) -> Option<&str> {
        match self {
            FeedError::Status { body, .. }
            | FeedError::Json { body, .. }
            | FeedError::MissingEnvelope { body }
            | FeedError::Api { body, .. } => Some(body),
            FeedError::Http(_) | FeedError::Io { .. } => None,
        }
    }
}
