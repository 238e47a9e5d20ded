//! Conversion from raw arrival records to estimates.
//!
//! A record is resolved against the catalog: route to line, direction code
//! to [`Direction`], destination stop or name to a station, and the two
//! feed timestamps to whole minutes. Malformed records are skipped; a
//! destination stop missing from the stop table means the reference data is
//! out of date and abandons the whole response.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::catalog::{Catalog, Namespace};
use crate::domain::{
    Direction, Estimate, InvalidDirection, LineRef, MapId, Position, StationRef, StopId,
};

use super::types::RawArrival;

/// Format of every timestamp in the feed (Chicago local time, no offset).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Error resolving a single arrival record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required field did not parse
    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    /// Route code matches no line
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    /// Direction code other than "1" or "5"
    #[error(transparent)]
    UnknownDirection(#[from] InvalidDirection),

    /// Destination stop is not in the stop table
    #[error("destination stop {0} is not in the stop table")]
    UnknownDestinationStop(StopId),
}

impl RecordError {
    /// Whether this error abandons the whole response rather than one record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecordError::UnknownDestinationStop(_))
    }
}

/// Estimates resolved from one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBatch {
    pub estimates: Vec<Estimate>,

    /// Destination names shown as Unknown, each listed once.
    pub unresolved_names: Vec<String>,
}

/// Resolve every record of a response.
///
/// Records that fail are logged and skipped. The first fatal error aborts
/// the batch.
pub fn resolve_batch(
    catalog: &Catalog,
    records: &[RawArrival],
) -> Result<ResolvedBatch, RecordError> {
    let mut batch = ResolvedBatch {
        estimates: Vec::with_capacity(records.len()),
        unresolved_names: Vec::new(),
    };

    for raw in records {
        match resolve_record(catalog, raw, &mut batch.unresolved_names) {
            Ok(estimate) => batch.estimates.push(estimate),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(
                    run = raw.run_number.as_deref().unwrap_or("?"),
                    route = raw.route.as_deref().unwrap_or("?"),
                    error = %e,
                    "skipping arrival record"
                );
            }
        }
    }

    Ok(batch)
}

/// Resolve one record into an estimate.
pub fn resolve_arrival(catalog: &Catalog, raw: &RawArrival) -> Result<Estimate, RecordError> {
    resolve_record(catalog, raw, &mut Vec::new())
}

fn resolve_record(
    catalog: &Catalog,
    raw: &RawArrival,
    unresolved_names: &mut Vec<String>,
) -> Result<Estimate, RecordError> {
    let run_number: u32 = required(&raw.run_number, "rn")?;

    let route = raw
        .route
        .as_deref()
        .ok_or(RecordError::MissingField("rt"))?;
    let line = catalog
        .resolve_line(route)
        .map_err(|_| RecordError::UnknownRoute(route.to_string()))?;

    let direction = raw
        .direction
        .as_deref()
        .map(Direction::from_code)
        .transpose()?;

    let destination = resolve_destination(catalog, raw, line, unresolved_names)?;
    let destination = loop_corrected(catalog, line, direction, destination);

    if let Some(direction) = direction
        && !catalog.line(line).terminates_at(direction, destination)
    {
        debug!(
            run = run_number,
            line = %catalog.line(line).name,
            destination = %catalog.station(destination).name,
            "destination is not a configured terminal"
        );
    }

    let is_approaching = flag(&raw.is_approaching);
    let minutes_away = if is_approaching {
        0
    } else {
        let generated = timestamp(&raw.generated_at, "prdt")?;
        let arrival = timestamp(&raw.arrival_at, "arrT")?;
        minutes_until(generated, arrival)
    };

    let position = match (optional(&raw.latitude), optional(&raw.longitude)) {
        (Some(latitude), Some(longitude)) => Some(Position {
            latitude,
            longitude,
        }),
        _ => None,
    };

    Ok(Estimate {
        run_number,
        map_id: optional::<MapId>(&raw.station_id),
        stop_id: optional::<StopId>(&raw.stop_id),
        line,
        direction,
        destination,
        heading: optional(&raw.heading),
        position,
        minutes_away,
        is_approaching,
        is_scheduled: flag(&raw.is_scheduled),
        is_delayed: flag(&raw.is_delayed),
        is_faulty: flag(&raw.is_faulty),
    })
}

/// Whole minutes from `generated` to `arrival`, rounded half to even and
/// never negative.
pub fn minutes_until(generated: NaiveDateTime, arrival: NaiveDateTime) -> u32 {
    let seconds = (arrival - generated).num_seconds() as f64;
    let minutes = (seconds / 60.0).round_ties_even();
    if minutes <= 0.0 { 0 } else { minutes as u32 }
}

fn resolve_destination(
    catalog: &Catalog,
    raw: &RawArrival,
    line: LineRef,
    unresolved_names: &mut Vec<String>,
) -> Result<StationRef, RecordError> {
    let stop: StopId = required(&raw.destination_stop, "destSt")?;
    if !stop.is_unassigned() {
        return catalog
            .resolve_stop_id(stop)
            .map_err(|_| RecordError::UnknownDestinationStop(stop));
    }

    // Not signed for a stop: fall back to the destination name.
    let name = raw.destination_name.as_deref().unwrap_or_default();
    let destination = catalog
        .resolve_name(name, Namespace::Stations)
        .or_else(|_| catalog.resolve_name(name, Namespace::Placeholders))
        .unwrap_or_else(|e| {
            warn!(
                destination = name,
                line = %catalog.line(line).name,
                error = %e,
                "unresolved destination name, showing as Unknown"
            );
            if !name.is_empty() && !unresolved_names.iter().any(|n| n == name) {
                unresolved_names.push(name.to_string());
            }
            catalog.unknown_placeholder()
        });
    Ok(destination)
}

/// Trains on a line whose main terminal in this direction is the Loop are
/// signed as Loop-bound whatever the feed names.
fn loop_corrected(
    catalog: &Catalog,
    line: LineRef,
    direction: Option<Direction>,
    destination: StationRef,
) -> StationRef {
    let Some(direction) = direction else {
        return destination;
    };
    let loop_placeholder = catalog.loop_placeholder();
    if catalog.line(line).main_terminal(direction) == Some(loop_placeholder) {
        loop_placeholder
    } else {
        destination
    }
}

fn required<T: std::str::FromStr>(
    field: &Option<String>,
    name: &'static str,
) -> Result<T, RecordError> {
    let value = field.as_deref().ok_or(RecordError::MissingField(name))?;
    value.trim().parse().map_err(|_| RecordError::InvalidField {
        field: name,
        value: value.to_string(),
    })
}

fn optional<T: std::str::FromStr>(field: &Option<String>) -> Option<T> {
    field.as_deref().and_then(|v| v.trim().parse().ok())
}

fn timestamp(field: &Option<String>, name: &'static str) -> Result<NaiveDateTime, RecordError> {
    let value = field.as_deref().ok_or(RecordError::MissingField(name))?;
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| RecordError::InvalidField {
            field: name,
            value: value.to_string(),
        })
}

fn flag(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| v.trim() == "1")
}
