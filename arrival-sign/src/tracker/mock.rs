//! Mock Train Tracker for running without API access.
//!
//! Serves recorded responses from `{map_id}.json` files in a directory,
//! read fresh on every request so they can be edited while the sign runs.

use std::path::{Path, PathBuf};

use crate::domain::MapId;

use super::client::{Arrivals, ArrivalsSource, parse_arrivals};
use super::error::FeedError;

/// Arrivals source backed by recorded responses on disk.
#[derive(Debug, Clone)]
pub struct MockTrainTracker {
    data_dir: PathBuf,
}

impl MockTrainTracker {
    /// Create a mock reading from `data_dir`.
    ///
    /// Fails if the directory cannot be read.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::read_dir(&data_dir).map_err(|source| FeedError::Io {
            path: data_dir.clone(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    /// Map ids that have recorded data.
    pub fn available_stations(&self) -> Vec<MapId> {
        let Ok(entries) = std::fs::read_dir(&self.data_dir) else {
            return Vec::new();
        };
        let mut stations: Vec<MapId> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .filter_map(|path| path.file_stem()?.to_str()?.parse().ok())
            .collect();
        stations.sort();
        stations
    }
}

impl ArrivalsSource for MockTrainTracker {
    async fn fetch_arrivals(&self, map_id: MapId) -> Result<Arrivals, FeedError> {
        let path = self.data_dir.join(format!("{map_id}.json"));
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FeedError::Io { path, source })?;
        parse_arrivals(body)
    }
}
