//! CTA Train Tracker arrivals feed.
//!
//! Key characteristics of the feed:
//! - One request returns every prediction for a station (`mapid`)
//! - Nearly every field is a string, including numbers and "1"/"0" flags
//! - Timestamps are Chicago local time without an offset
//! - Errors are reported in the body (`errCd`) with HTTP 200

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{
    Arrivals, ArrivalsSource, TrainTrackerClient, TrainTrackerConfig, parse_arrivals,
};
pub use convert::{
    RecordError, ResolvedBatch, TIMESTAMP_FORMAT, minutes_until, resolve_arrival, resolve_batch,
};
pub use error::FeedError;
pub use mock::MockTrainTracker;
pub use types::{ArrivalsEnvelope, ArrivalsResponse, RawArrival};
