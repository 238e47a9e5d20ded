//! Station, stop and catalog reference identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid numeric identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct InvalidId {
    kind: &'static str,
    value: String,
}

/// A parent-station identifier ("map id", 4xxxx in the CTA numbering).
///
/// Every boardable station has exactly one map id. Platforms within the
/// station are identified separately by [`StopId`].
///
/// # Examples
///
/// ```
/// use arrival_sign::domain::MapId;
///
/// let state_lake: MapId = "40260".parse().unwrap();
/// assert_eq!(state_lake, MapId(40260));
/// assert!("Loop".parse::<MapId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub u32);

/// A platform/stop identifier (3xxxx in the CTA numbering).
///
/// The arrivals feed reports a train's destination as a stop id; the
/// stop table maps each stop to the [`MapId`] of its station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub u32);

impl StopId {
    /// The feed's "no station assigned" sentinel.
    pub const UNASSIGNED: StopId = StopId(0);

    /// Returns true if this is the "no station assigned" sentinel.
    pub fn is_unassigned(self) -> bool {
        self == Self::UNASSIGNED
    }
}

fn parse_u32(s: &str, kind: &'static str) -> Result<u32, InvalidId> {
    s.trim().parse().map_err(|_| InvalidId {
        kind,
        value: s.to_string(),
    })
}

impl FromStr for MapId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_u32(s, "map id").map(MapId)
    }
}

impl FromStr for StopId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_u32(s, "stop id").map(StopId)
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a station (real or placeholder) inside a loaded catalog.
///
/// Two references are equal exactly when they point at the same catalog
/// entry, so comparing destinations never compares names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationRef(pub(crate) usize);

/// Handle to a line inside a loaded catalog.
///
/// Lines are stored in configuration order, so the handle doubles as the
/// line's rank: ordering by `LineRef` is the stable display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineRef(pub(crate) usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_map_and_stop_ids() {
        assert_eq!("40380".parse::<MapId>().unwrap(), MapId(40380));
        assert_eq!(" 30074 ".parse::<StopId>().unwrap(), StopId(30074));
    }

    #[test]
    fn reject_non_numeric() {
        let err = "Loop".parse::<MapId>().unwrap_err();
        assert_eq!(err.to_string(), "invalid map id: 'Loop'");
        assert!("".parse::<StopId>().is_err());
        assert!("-4".parse::<StopId>().is_err());
    }

    #[test]
    fn unassigned_stop_sentinel() {
        assert!(StopId(0).is_unassigned());
        assert!(!StopId(30249).is_unassigned());
    }

    #[test]
    fn line_rank_follows_order() {
        assert!(LineRef(1) < LineRef(2));
    }

    #[test]
    fn deserialize_transparent() {
        let id: MapId = serde_json::from_str("41290").unwrap();
        assert_eq!(id, MapId(41290));
    }
}
