//! Resolved stations and lines.

use crate::domain::{ByDirection, Direction, LineRef, MapId, Rgb, StationRef};

use super::defs::StationDef;

/// Maximum characters of a station name shown in the sign header.
const DISPLAY_NAME_CHARS: usize = 14;

/// Maximum characters of a station name shown in a destination row.
const DESTINATION_DISPLAY_CHARS: usize = 7;

/// A boardable station or a nonstation destination placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,

    /// Unambiguous name used when `name` is shared (defaults to `name`).
    pub lookup_name: String,

    pub other_names: Vec<String>,

    /// Header text for a sign at this station.
    pub display_name: String,

    /// Row text when this station is a destination.
    pub destination_display: String,

    pub map_id: Option<MapId>,

    pub ada: bool,

    /// Lines serving the station, in rank order.
    pub lines: Vec<LineRef>,

    /// A synthetic destination label ("Loop", "Unknown"), not a stop.
    pub is_nonstation: bool,
}

impl Station {
    /// Build a station from its definition; lines are attached later.
    pub(crate) fn from_def(def: &StationDef) -> Self {
        let truncate = |n: usize| def.name.chars().take(n).collect::<String>();

        Self {
            name: def.name.clone(),
            lookup_name: def.lookup_name.clone().unwrap_or_else(|| def.name.clone()),
            other_names: def.other_names.clone(),
            display_name: def
                .display_name
                .clone()
                .unwrap_or_else(|| truncate(DISPLAY_NAME_CHARS)),
            destination_display: def
                .destination_display
                .clone()
                .unwrap_or_else(|| truncate(DESTINATION_DISPLAY_CHARS)),
            map_id: def.map_id,
            ada: def.ada,
            lines: Vec::new(),
            is_nonstation: def.is_nonstation,
        }
    }

    /// Case-insensitive match on the lookup name or any alias.
    pub(crate) fn answers_to_alias(&self, lowered: &str) -> bool {
        self.lookup_name.to_lowercase() == lowered
            || self.other_names.iter().any(|n| n.to_lowercase() == lowered)
    }
}

/// Where trains in one direction of a line end up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terminals {
    /// The destination most trains in this direction are signed for.
    pub main: Option<StationRef>,

    /// Short-turn and branch terminals.
    pub others: Vec<StationRef>,
}

/// A rail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub name: String,
    pub rgb: Rgb,
    pub symbols: Vec<String>,
    pub terminals: ByDirection<Terminals>,
}

impl Line {
    /// The main terminal for trains heading `direction`.
    pub fn main_terminal(&self, direction: Direction) -> Option<StationRef> {
        self.terminals[direction].main
    }

    /// Whether `station` is any configured terminal for `direction`.
    pub fn terminates_at(&self, direction: Direction, station: StationRef) -> bool {
        let terminals = &self.terminals[direction];
        terminals.main == Some(station) || terminals.others.contains(&station)
    }

    /// Case-insensitive match on the full name.
    pub(crate) fn is_named(&self, lowered: &str) -> bool {
        self.name.to_lowercase() == lowered
    }

    /// Case-insensitive match on any symbol.
    pub(crate) fn has_symbol(&self, lowered: &str) -> bool {
        self.symbols.iter().any(|s| s.to_lowercase() == lowered)
    }
}
