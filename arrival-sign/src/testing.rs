//! Shared fixtures for unit tests.
//!
//! A small slice of the CTA network: the State/Lake sign (five Loop lines,
//! two pages) and a Clark/Lake sign, with the terminals they need.

use crate::catalog::{
    Catalog, CollapseDef, LayoutDef, LineDef, Namespace, PageDef, PanelsDef, PatternDef, StationDef,
    StationSpec, StopRow,
};
use crate::domain::{Direction, Estimate, MapId, Rgb, StopId};
use crate::tracker::RawArrival;

fn station(name: &str, map_id: u32, lines: &[&str]) -> StationDef {
    StationDef {
        name: name.to_string(),
        map_id: Some(MapId(map_id)),
        lines: lines.iter().map(|l| l.to_string()).collect(),
        ..StationDef::default()
    }
}

fn placeholder(name: &str) -> StationDef {
    StationDef {
        name: name.to_string(),
        is_nonstation: true,
        ..StationDef::default()
    }
}

pub fn fixture_stations() -> Vec<StationDef> {
    const LOOP_LINES: [&str; 5] = ["Brown", "Green", "Orange", "Pink", "Purple"];

    vec![
        StationDef {
            stop_ids: vec![StopId(30051)],
            ..station("State/Lake", 40260, &LOOP_LINES)
        },
        station(
            "Clark/Lake",
            40380,
            &["Blue", "Brown", "Green", "Orange", "Pink", "Purple"],
        ),
        station("Kimball", 41290, &["Brown"]),
        station("Midway", 40930, &["Orange"]),
        station("O'Hare", 40890, &["Blue"]),
        station("Forest Park", 40390, &["Blue"]),
        StationDef {
            lookup_name: Some("Harlem (O'Hare)".to_string()),
            ..station("Harlem", 40750, &["Blue"])
        },
        StationDef {
            lookup_name: Some("Harlem (Forest Park)".to_string()),
            other_names: vec!["Harlem-Congress".to_string()],
            ..station("Harlem", 40980, &["Blue"])
        },
        station("Harlem/Lake", 40020, &["Green"]),
        StationDef {
            destination_display: Some("Ashland".to_string()),
            ..station("Ashland/63rd", 40290, &["Green"])
        },
        StationDef {
            destination_display: Some("Cottage".to_string()),
            ..station("Cottage Grove", 40720, &["Green"])
        },
        station("Linden", 41050, &["Purple"]),
        station("Howard", 40900, &["Purple"]),
        StationDef {
            destination_display: Some("54th".to_string()),
            ..station("54th/Cermak", 40580, &["Pink"])
        },
        placeholder("Loop"),
        placeholder("Unknown"),
        placeholder("63/A/C"),
        placeholder("See Train"),
    ]
}

fn line(
    name: &str,
    rgb: &str,
    symbols: &[&str],
    north: StationSpec,
    south: StationSpec,
) -> LineDef {
    LineDef {
        name: name.to_string(),
        rgb: rgb_of(rgb),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        main_dest_north: Some(north),
        main_dest_south: Some(south),
        other_dest_north: Vec::new(),
        other_dest_south: Vec::new(),
    }
}

fn id(map_id: u32) -> StationSpec {
    StationSpec::MapId(MapId(map_id))
}

fn named(name: &str) -> StationSpec {
    StationSpec::Name(name.to_string())
}

pub fn rgb_of(hex: &str) -> Rgb {
    Rgb::parse(hex).unwrap()
}

pub fn fixture_lines() -> Vec<LineDef> {
    vec![
        line("Blue", "00a1de", &["Blue"], id(40890), id(40390)),
        line("Brown", "62361b", &["Brn"], id(41290), named("Loop")),
        LineDef {
            other_dest_south: vec![id(40720)],
            ..line("Green", "009b3a", &["G"], id(40020), id(40290))
        },
        line("Orange", "f9461c", &["Org"], named("Loop"), id(40930)),
        LineDef {
            other_dest_south: vec![id(40900)],
            ..line("Purple", "522398", &["P", "Pexp"], id(41050), named("Loop"))
        },
        line("Pink", "e27ea6", &["Pink"], named("Loop"), id(40580)),
    ]
}

fn pattern(line: &str, direction: Direction, destination: StationSpec) -> PatternDef {
    PatternDef {
        line: line.to_string(),
        direction,
        destination,
    }
}

/// State/Lake layout first, then Clark/Lake.
///
/// State/Lake page 2 has six slots and two disjoint collapse groups,
/// {2, 3} (Green south) and {4, 5} (Purple and Pink to the Loop).
pub fn fixture_layouts() -> Vec<LayoutDef> {
    use Direction::{North, South};

    let state_lake = LayoutDef {
        lines: ["Brown", "Green", "Orange", "Pink", "Purple"]
            .map(String::from)
            .to_vec(),
        pages: vec![
            PageDef {
                page: 1,
                patterns: vec![
                    pattern("Brown", North, id(41290)),
                    pattern("Purple", North, id(41050)),
                    pattern("Green", North, id(40020)),
                    pattern("Pink", South, id(40580)),
                ],
                hide: vec![1],
                collapse: Vec::new(),
                panels: None,
            },
            PageDef {
                page: 2,
                patterns: vec![
                    pattern("Orange", South, id(40930)),
                    pattern("Orange", North, named("Loop")),
                    pattern("Green", South, id(40290)),
                    pattern("Green", South, id(40720)),
                    pattern("Purple", South, named("Loop")),
                    pattern("Pink", North, named("Loop")),
                ],
                hide: vec![1, 5],
                collapse: vec![
                    CollapseDef {
                        subpatterns: vec![2, 3],
                        line: "Green".to_string(),
                        direction: South,
                        destination: named("63/A/C"),
                        destination_rgb: ["009b3a", "009b3a", "ffffff", "009b3a", "ffffff", "009b3a"]
                            .map(rgb_of)
                            .to_vec(),
                        subpattern_rgb: vec![rgb_of("009b3a"), rgb_of("7fcd9c")],
                    },
                    CollapseDef {
                        subpatterns: vec![4, 5],
                        line: "Purple".to_string(),
                        direction: South,
                        destination: named("Loop"),
                        destination_rgb: ["522398", "522398", "e27ea6", "e27ea6"]
                            .map(rgb_of)
                            .to_vec(),
                        subpattern_rgb: vec![rgb_of("522398"), rgb_of("e27ea6")],
                    },
                ],
                panels: Some(PanelsDef {
                    left: vec!["Org".to_string(), "Green".to_string()],
                    right: vec!["Purple".to_string(), "Pink".to_string()],
                }),
            },
        ],
    };

    let clark_lake = LayoutDef {
        lines: ["Blue", "Brown", "Green", "Orange", "Pink", "Purple"]
            .map(String::from)
            .to_vec(),
        pages: vec![PageDef {
            page: 1,
            patterns: vec![
                pattern("Blue", North, id(40890)),
                pattern("Blue", South, id(40390)),
            ],
            hide: Vec::new(),
            collapse: Vec::new(),
            panels: None,
        }],
    };

    vec![state_lake, clark_lake]
}

pub fn fixture_stops() -> Vec<StopRow> {
    [
        (30050, 40260),
        (30074, 40380),
        (30249, 41290),
        (30182, 40930),
        (30171, 40890),
        (30077, 40390),
        (30004, 40020),
        (30057, 40290),
        (30139, 40720),
        (30203, 41050),
        (30173, 40900),
        (30113, 40580),
    ]
    .into_iter()
    .map(|(stop, map)| StopRow {
        stop_id: StopId(stop),
        map_id: MapId(map),
    })
    .collect()
}

pub fn fixture_catalog() -> Catalog {
    Catalog::from_parts(
        &fixture_stations(),
        &fixture_lines(),
        &fixture_layouts(),
        &fixture_stops(),
    )
    .unwrap()
}

/// A live-looking arrival record at State/Lake, three minutes out.
pub fn raw_arrival(route: &str, direction: &str, dest_stop: &str, dest_name: &str) -> RawArrival {
    RawArrival {
        station_id: Some("40260".to_string()),
        stop_id: Some("30050".to_string()),
        station_name: Some("State/Lake".to_string()),
        run_number: Some("421".to_string()),
        route: Some(route.to_string()),
        direction: Some(direction.to_string()),
        destination_stop: Some(dest_stop.to_string()),
        destination_name: Some(dest_name.to_string()),
        generated_at: Some("2026-10-19T17:40:00".to_string()),
        arrival_at: Some("2026-10-19T17:43:00".to_string()),
        is_approaching: Some("0".to_string()),
        is_scheduled: Some("0".to_string()),
        is_delayed: Some("0".to_string()),
        is_faulty: Some("0".to_string()),
        latitude: Some("41.88574".to_string()),
        longitude: Some("-87.62758".to_string()),
        heading: Some("89".to_string()),
        ..RawArrival::default()
    }
}

/// Set the predicted arrival of a record to `minutes` after generation.
pub fn arriving_in(mut raw: RawArrival, minutes: u32) -> RawArrival {
    let total = 17 * 60 + 40 + minutes;
    raw.arrival_at = Some(format!("2026-10-19T{:02}:{:02}:00", total / 60, total % 60));
    raw
}

/// An estimate at State/Lake; `destination` may be a station or placeholder
/// name.
pub fn estimate(
    catalog: &Catalog,
    run: u32,
    line: &str,
    direction: Direction,
    destination: &str,
    minutes: u32,
) -> Estimate {
    let destination = catalog
        .resolve_name(destination, Namespace::Stations)
        .or_else(|_| catalog.resolve_name(destination, Namespace::Placeholders))
        .unwrap();
    Estimate {
        run_number: run,
        map_id: Some(MapId(40260)),
        stop_id: None,
        line: catalog.resolve_line(line).unwrap(),
        direction: Some(direction),
        destination,
        heading: None,
        position: None,
        minutes_away: minutes,
        is_approaching: minutes == 0,
        is_scheduled: false,
        is_delayed: false,
        is_faulty: false,
    }
}
