//! The refresh cycle: fetch, resolve, bind, collapse, render, publish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::catalog::{Catalog, ConfigError, UNKNOWN};
use crate::domain::{MapId, StationRef};
use crate::payload_log::PayloadLog;
use crate::tracker::{ArrivalsSource, FeedError, RecordError, resolve_batch};

use super::binder::bind;
use super::collapse::DEFAULT_CAPACITY;
use super::render::{BoardSnapshot, render_board};

/// A refresh cycle that was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// The feed could not be fetched or reported an error
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// A record showed the reference data is out of date
    #[error("unusable arrival record: {source}")]
    Record {
        #[source]
        source: RecordError,
        body: String,
    },

    /// The station has no usable layout
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CycleError {
    /// The raw feed response, when one was received.
    pub fn payload(&self) -> Option<&str> {
        match self {
            CycleError::Feed(e) => e.payload(),
            CycleError::Record { body, .. } => Some(body),
            CycleError::Config(_) => None,
        }
    }
}

/// The most recently published board, shared with readers.
///
/// Readers get an `Arc` to an immutable snapshot; publishing swaps the
/// whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedBoard {
    inner: Arc<RwLock<Option<Arc<BoardSnapshot>>>>,
}

impl SharedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, if one has been published.
    pub async fn current(&self) -> Option<Arc<BoardSnapshot>> {
        self.inner.read().await.clone()
    }

    pub async fn publish(&self, snapshot: Arc<BoardSnapshot>) {
        let mut guard = self.inner.write().await;
        *guard = Some(snapshot);
    }
}

/// Rebuilds the board for one station from an arrivals source.
pub struct BoardRefresher<S> {
    catalog: Arc<Catalog>,
    source: S,
    station: StationRef,
    map_id: MapId,
    capacity: usize,
    board: SharedBoard,
    payload_log: PayloadLog,
}

impl<S: ArrivalsSource> BoardRefresher<S> {
    /// Create a refresher for `station`.
    ///
    /// Fails if the station has no map id or no layout.
    pub fn new(
        catalog: Arc<Catalog>,
        source: S,
        station: StationRef,
        board: SharedBoard,
        payload_log: PayloadLog,
    ) -> Result<Self, ConfigError> {
        let details = catalog.station(station);
        let map_id = details.map_id.ok_or_else(|| ConfigError::InvalidStation {
            name: details.name.clone(),
            message: "has no map id".to_string(),
        })?;
        catalog.layout_for(station)?;

        Ok(Self {
            catalog,
            source,
            station,
            map_id,
            capacity: DEFAULT_CAPACITY,
            board,
            payload_log,
        })
    }

    /// Set the number of rows on the sign.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Run one cycle and publish the result.
    ///
    /// On failure the raw response (if any) is written to the payload log
    /// and the previously published board stays in place.
    pub async fn refresh(&self) -> Result<Arc<BoardSnapshot>, CycleError> {
        match self.build().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.board.publish(Arc::clone(&snapshot)).await;
                info!(
                    station = %snapshot.station,
                    pages = snapshot.pages.len(),
                    dropped = snapshot.dropped,
                    "published board"
                );
                Ok(snapshot)
            }
            Err(e) => {
                match e.payload().map(|payload| self.payload_log.record(payload)) {
                    Some(Ok(path)) => {
                        error!(error = %e, payload = %path.display(), "refresh abandoned")
                    }
                    Some(Err(log_error)) => {
                        error!(error = %e, %log_error, "refresh abandoned, payload not saved")
                    }
                    None => error!(error = %e, "refresh abandoned"),
                }
                Err(e)
            }
        }
    }

    /// Refresh every `period` forever. Failed cycles are logged and retried
    /// on the next tick.
    pub async fn run(self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let _ = self.refresh().await;
        }
    }

    async fn build(&self) -> Result<BoardSnapshot, CycleError> {
        let arrivals = self.source.fetch_arrivals(self.map_id).await?;

        let batch = match resolve_batch(&self.catalog, &arrivals.records) {
            Ok(batch) => batch,
            Err(source) => {
                return Err(CycleError::Record {
                    source,
                    body: arrivals.body,
                });
            }
        };

        self.record_unresolved(&batch.unresolved_names);

        let layout = self.catalog.layout_for(self.station)?;
        let bound = bind(layout, batch.estimates);

        Ok(render_board(
            &self.catalog,
            self.catalog.station(self.station),
            layout,
            &bound,
            self.capacity,
            arrivals.timestamp,
        ))
    }

    /// Leave a note in the payload log for each destination name the
    /// catalog could not place.
    fn record_unresolved(&self, names: &[String]) {
        let station = &self.catalog.station(self.station).display_name;
        for name in names {
            let note = format!("{station}: destination '{name}' not found, shown as {UNKNOWN}");
            if let Err(e) = self.payload_log.record_text(&note) {
                warn!(error = %e, destination = %name, "failed to save unresolved destination");
            }
        }
    }
}
