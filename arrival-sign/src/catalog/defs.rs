//! On-disk reference data definitions.
//!
//! These types map directly to the bundled `stations.json`, `lines.json`,
//! `layouts.json` and `stops.csv` files. Names in them are unresolved
//! strings; [`Catalog::from_parts`](super::Catalog::from_parts) resolves and
//! validates every reference.

use serde::Deserialize;

use crate::domain::{Direction, MapId, Rgb, StopId};

/// A reference to a station inside configuration.
///
/// Numbers are map ids of real stations; strings name nonstation
/// placeholders such as `"Loop"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StationSpec {
    MapId(MapId),
    Name(String),
}

/// An entry of `stations.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationDef {
    pub name: String,

    /// Unambiguous alternative to `name` (e.g. "Harlem (O'Hare)").
    #[serde(default)]
    pub lookup_name: Option<String>,

    #[serde(default)]
    pub other_names: Vec<String>,

    /// Station sign text; defaults to the first 14 characters of `name`.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Destination row text; defaults to the first 7 characters of `name`.
    #[serde(default)]
    pub destination_display: Option<String>,

    #[serde(default)]
    pub map_id: Option<MapId>,

    /// Extra stops to register for this station on top of the stop table.
    #[serde(default)]
    pub stop_ids: Vec<StopId>,

    #[serde(default)]
    pub ada: bool,

    /// Line names or symbols serving the station.
    #[serde(default)]
    pub lines: Vec<String>,

    #[serde(default)]
    pub is_nonstation: bool,
}

/// An entry of `lines.json`. File order is the line's rank.
#[derive(Debug, Clone, Deserialize)]
pub struct LineDef {
    #[serde(rename = "line")]
    pub name: String,

    pub rgb: Rgb,

    /// Abbreviations, including the feed's route code.
    #[serde(default)]
    pub symbols: Vec<String>,

    #[serde(default)]
    pub main_dest_north: Option<StationSpec>,

    #[serde(default)]
    pub main_dest_south: Option<StationSpec>,

    #[serde(default)]
    pub other_dest_north: Vec<StationSpec>,

    #[serde(default)]
    pub other_dest_south: Vec<StationSpec>,
}

/// An entry of `layouts.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDef {
    pub lines: Vec<String>,
    pub pages: Vec<PageDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageDef {
    pub page: u32,

    pub patterns: Vec<PatternDef>,

    /// Slot indices hidden while they have no estimates.
    #[serde(default)]
    pub hide: Vec<usize>,

    /// Collapse groups, tried in order.
    #[serde(default)]
    pub collapse: Vec<CollapseDef>,

    #[serde(default)]
    pub panels: Option<PanelsDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternDef {
    pub line: String,
    pub direction: Direction,
    pub destination: StationSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollapseDef {
    pub subpatterns: Vec<usize>,
    pub line: String,
    pub direction: Direction,
    pub destination: StationSpec,

    /// One color per character of the merged destination name.
    pub destination_rgb: Vec<Rgb>,

    /// One color per member, used for that member's estimates.
    pub subpattern_rgb: Vec<Rgb>,
}

/// Line colors for the sign's side panels.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelsDef {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// A row of the stop table. Other columns in the file are ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StopRow {
    #[serde(rename = "STOP_ID")]
    pub stop_id: StopId,

    #[serde(rename = "MAP_ID")]
    pub map_id: MapId,
}
