//! Train direction and per-direction configuration.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Error returned for a direction code the feed is not known to send.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction code '{0}'")]
pub struct InvalidDirection(pub String);

/// Direction of travel along a line.
///
/// The arrivals feed encodes this as `"1"` (North) or `"5"` (South);
/// configuration files spell it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Decode a feed direction code.
    pub fn from_code(code: &str) -> Result<Self, InvalidDirection> {
        match code {
            "1" => Ok(Direction::North),
            "5" => Ok(Direction::South),
            other => Err(InvalidDirection(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByDirection<T> {
    pub north: T,
    pub south: T,
}

impl<T> ByDirection<T> {
    pub fn new(north: T, south: T) -> Self {
        Self { north, south }
    }

    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
        }
    }
}

impl<T> Index<Direction> for ByDirection<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        self.get(direction)
    }
}
