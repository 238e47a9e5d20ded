//! Reference catalog: stations, lines, sign layouts and the stop table.
//!
//! The catalog is loaded once at startup from the bundled resource files and
//! is read-only afterwards, so it can be shared behind an `Arc` without
//! locking. Every reference between files is resolved while loading; a
//! catalog that loads is internally consistent.
//!
//! Lookups return [`LookupError`] rather than panicking so that callers
//! resolving live feed data can fall back to a placeholder.

mod defs;
mod error;
mod layout;
mod model;

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{ByDirection, LineRef, MapId, StationRef, StopId};

pub use defs::{
    CollapseDef, LayoutDef, LineDef, PageDef, PanelsDef, PatternDef, StationDef, StationSpec,
    StopRow,
};
pub use error::{ConfigError, LookupError};
pub use layout::{CollapseGroup, Layout, Page, Panels, SlotPosition};
pub use model::{Line, Station, Terminals};

/// Name of the placeholder that Loop-bound trains are signed as.
pub const LOOP: &str = "Loop";

/// Name of the placeholder for destinations the catalog does not know.
pub const UNKNOWN: &str = "Unknown";

/// Which set of stations a name lookup searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Real, boardable stations.
    Stations,
    /// Synthetic destination labels such as "Loop".
    Placeholders,
}

impl Namespace {
    fn admits(self, station: &Station) -> bool {
        station.is_nonstation == (self == Namespace::Placeholders)
    }
}

/// The immutable registry of reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    stations: Vec<Station>,
    lines: Vec<Line>,
    layouts: Vec<Layout>,
    stops: HashMap<StopId, MapId>,
    by_map_id: HashMap<MapId, StationRef>,
    loop_placeholder: StationRef,
    unknown_placeholder: StationRef,
}

impl Catalog {
    /// Load the catalog from a resource directory containing
    /// `stations.json`, `lines.json`, `layouts.json` and `stops.csv`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        let stations: Vec<StationDef> = read_json(&dir.join("stations.json"))?;
        let lines: Vec<LineDef> = read_json(&dir.join("lines.json"))?;
        let layouts: Vec<LayoutDef> = read_json(&dir.join("layouts.json"))?;
        let stops = read_stops(&dir.join("stops.csv"))?;

        Self::from_parts(&stations, &lines, &layouts, &stops)
    }

    /// Build and validate a catalog from in-memory definitions.
    pub fn from_parts(
        stations: &[StationDef],
        lines: &[LineDef],
        layouts: &[LayoutDef],
        stops: &[StopRow],
    ) -> Result<Self, ConfigError> {
        let mut by_map_id = HashMap::new();
        let mut stop_table: HashMap<StopId, MapId> =
            stops.iter().map(|row| (row.stop_id, row.map_id)).collect();

        for (i, def) in stations.iter().enumerate() {
            if let Some(map_id) = def.map_id
                && by_map_id.insert(map_id, StationRef(i)).is_some()
            {
                return Err(ConfigError::DuplicateMapId(map_id));
            }

            if !def.stop_ids.is_empty() {
                let Some(map_id) = def.map_id else {
                    return Err(ConfigError::InvalidStation {
                        name: def.name.clone(),
                        message: "lists stop ids but has no map id".to_string(),
                    });
                };
                for stop in &def.stop_ids {
                    stop_table.insert(*stop, map_id);
                }
            }
        }

        let placeholder = |name: &'static str| {
            stations
                .iter()
                .position(|s| s.is_nonstation && s.name.eq_ignore_ascii_case(name))
                .map(StationRef)
                .ok_or(ConfigError::MissingPlaceholder(name))
        };

        let mut catalog = Self {
            stations: stations.iter().map(Station::from_def).collect(),
            lines: Vec::new(),
            layouts: Vec::new(),
            stops: stop_table,
            by_map_id,
            loop_placeholder: placeholder(LOOP)?,
            unknown_placeholder: placeholder(UNKNOWN)?,
        };

        // Lines refer to stations, stations refer to lines: resolve terminals
        // first, then attach lines to stations.
        catalog.lines = lines
            .iter()
            .map(|def| catalog.build_line(def))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, def) in stations.iter().enumerate() {
            let mut station_lines = def
                .lines
                .iter()
                .map(|name| {
                    catalog
                        .resolve_line(name)
                        .map_err(ConfigError::lookup(format!("station '{}'", def.name)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            station_lines.sort();
            station_lines.dedup();
            catalog.stations[i].lines = station_lines;
        }

        catalog.layouts = layouts
            .iter()
            .enumerate()
            .map(|(i, def)| Layout::from_def(i, def, &catalog))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(catalog)
    }

    fn build_line(&self, def: &LineDef) -> Result<Line, ConfigError> {
        let terminals = |main: &Option<StationSpec>, others: &[StationSpec], direction: &str| {
            let context = format!("line '{}' {direction} terminal", def.name);
            Ok::<_, ConfigError>(Terminals {
                main: main
                    .as_ref()
                    .map(|spec| self.resolve_spec(spec))
                    .transpose()
                    .map_err(ConfigError::lookup(context.clone()))?,
                others: others
                    .iter()
                    .map(|spec| self.resolve_spec(spec))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(ConfigError::lookup(context))?,
            })
        };

        Ok(Line {
            name: def.name.clone(),
            rgb: def.rgb,
            symbols: def.symbols.clone(),
            terminals: ByDirection::new(
                terminals(&def.main_dest_north, &def.other_dest_north, "north")?,
                terminals(&def.main_dest_south, &def.other_dest_south, "south")?,
            ),
        })
    }

    /// Get a station by reference.
    ///
    /// # Panics
    ///
    /// If `station` was produced by a different catalog.
    pub fn station(&self, station: StationRef) -> &Station {
        &self.stations[station.0]
    }

    /// Get a line by reference.
    ///
    /// # Panics
    ///
    /// If `line` was produced by a different catalog.
    pub fn line(&self, line: LineRef) -> &Line {
        &self.lines[line.0]
    }

    /// All stations and placeholders, in file order.
    pub fn stations(&self) -> impl Iterator<Item = (StationRef, &Station)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationRef(i), s))
    }

    /// All lines, in rank order.
    pub fn lines(&self) -> impl Iterator<Item = (LineRef, &Line)> {
        self.lines.iter().enumerate().map(|(i, l)| (LineRef(i), l))
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// The "Loop" placeholder.
    pub fn loop_placeholder(&self) -> StationRef {
        self.loop_placeholder
    }

    /// The "Unknown" placeholder.
    pub fn unknown_placeholder(&self) -> StationRef {
        self.unknown_placeholder
    }

    /// Resolve a station by name within one namespace.
    ///
    /// An exact (case-insensitive) primary-name match wins, but only if it
    /// is unique; otherwise lookup names and aliases are searched and the
    /// first match wins.
    pub fn resolve_name(
        &self,
        name: &str,
        namespace: Namespace,
    ) -> Result<StationRef, LookupError> {
        let lowered = name.to_lowercase();
        let candidates = || self.stations().filter(move |(_, s)| namespace.admits(s));

        let mut exact = candidates().filter(|(_, s)| s.name.to_lowercase() == lowered);
        match (exact.next(), exact.next()) {
            (Some((station, _)), None) => return Ok(station),
            (Some(_), Some(_)) => return Err(LookupError::Ambiguous(name.to_string())),
            (None, _) => {}
        }

        candidates()
            .find(|(_, s)| s.answers_to_alias(&lowered))
            .map(|(station, _)| station)
            .ok_or_else(|| LookupError::not_found("station", name))
    }

    /// Resolve a station by map id.
    pub fn resolve_map_id(&self, map_id: MapId) -> Result<StationRef, LookupError> {
        self.by_map_id
            .get(&map_id)
            .copied()
            .ok_or_else(|| LookupError::not_found("map id", map_id))
    }

    /// Resolve a station by stop id, via the stop table.
    pub fn resolve_stop_id(&self, stop_id: StopId) -> Result<StationRef, LookupError> {
        let map_id = self
            .stops
            .get(&stop_id)
            .ok_or_else(|| LookupError::not_found("stop id", stop_id))?;
        self.resolve_map_id(*map_id)
    }

    /// Resolve a configuration reference: map ids are real stations,
    /// names are placeholders.
    pub fn resolve_spec(&self, spec: &StationSpec) -> Result<StationRef, LookupError> {
        match spec {
            StationSpec::MapId(map_id) => self.resolve_map_id(*map_id),
            StationSpec::Name(name) => self.resolve_name(name, Namespace::Placeholders),
        }
    }

    /// Resolve a station from user input: a numeric map id or a real
    /// station's name.
    pub fn resolve_station_query(&self, query: &str) -> Result<StationRef, LookupError> {
        match query.parse::<MapId>() {
            Ok(map_id) => self.resolve_map_id(map_id),
            Err(_) => self.resolve_name(query, Namespace::Stations),
        }
    }

    /// Resolve a line by full name, then by symbol (both case-insensitive).
    pub fn resolve_line(&self, name_or_symbol: &str) -> Result<LineRef, LookupError> {
        let lowered = name_or_symbol.to_lowercase();
        self.lines()
            .find(|(_, l)| l.is_named(&lowered))
            .or_else(|| self.lines().find(|(_, l)| l.has_symbol(&lowered)))
            .map(|(line, _)| line)
            .ok_or_else(|| LookupError::not_found("line", name_or_symbol))
    }

    /// The layout serving exactly the station's set of lines.
    pub fn layout_for(&self, station: StationRef) -> Result<&Layout, ConfigError> {
        let station = self.station(station);
        self.layouts
            .iter()
            .find(|layout| layout.serves(&station.lines))
            .ok_or_else(|| ConfigError::NoLayout(station.name.clone()))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_stops(path: &Path) -> Result<Vec<StopRow>, ConfigError> {
    let csv_error = |source| ConfigError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize()
        .collect::<Result<Vec<StopRow>, _>>()
        .map_err(csv_error)
}
