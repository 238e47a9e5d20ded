//! Turning collapsed pages into what the sign displays.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::catalog::{Catalog, Layout, Page, Station};
use crate::domain::{Estimate, LineRef, MapId, Rgb};

use super::binder::BoundLayout;
use super::collapse::{RenderSlot, collapse};

/// Color of schedule-based estimates.
pub const SCHEDULED_GRAY: Rgb = Rgb::new(0x2b, 0x2d, 0x2e);

/// Estimates shown per row.
pub const MAX_ESTIMATES: usize = 3;

/// Everything the sign shows for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    /// Station header text.
    pub station: String,
    pub map_id: Option<MapId>,

    /// When the feed generated the data.
    pub feed_time: Option<NaiveDateTime>,

    /// When this snapshot was built.
    pub generated_at: DateTime<Utc>,

    pub pages: Vec<PageView>,

    /// Estimates with no row on this sign.
    pub dropped: usize,
}

/// One page of the sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub number: u32,
    pub left_panel: Vec<Rgb>,
    pub right_panel: Vec<Rgb>,
    pub rows: Vec<RowView>,
}

/// One row of the sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub line: String,
    pub line_color: Rgb,

    pub destination: String,

    /// A single color for the whole name, or one per character.
    pub destination_colors: Vec<Rgb>,

    pub estimates: Vec<EstimateView>,
    pub collapsed: bool,
}

impl RowView {
    /// The destination name paired with the color of each character.
    pub fn glyphs(&self) -> Vec<Glyph> {
        let single = self.destination_colors.len() == 1;
        self.destination
            .chars()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                color: if single {
                    self.destination_colors[0]
                } else {
                    self.destination_colors
                        .get(i)
                        .copied()
                        .unwrap_or(self.line_color)
                },
            })
            .collect()
    }
}

/// A character of a destination name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb,
}

/// One estimate as shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateView {
    /// Minutes right-aligned to two columns, then any S/D/F flags.
    pub text: String,
    pub color: Rgb,
    pub run_number: u32,
    pub approaching: bool,
}

/// Collapse and render every page of a bound layout.
pub fn render_board(
    catalog: &Catalog,
    station: &Station,
    layout: &Layout,
    bound: &BoundLayout,
    capacity: usize,
    feed_time: Option<NaiveDateTime>,
) -> BoardSnapshot {
    let pages = layout
        .pages
        .iter()
        .zip(&bound.pages)
        .map(|(page, bound_page)| render_page(catalog, page, &collapse(page, bound_page, capacity)))
        .collect();

    BoardSnapshot {
        station: station.display_name.clone(),
        map_id: station.map_id,
        feed_time,
        generated_at: Utc::now(),
        pages,
        dropped: bound.dropped,
    }
}

/// Render one collapsed page.
pub fn render_page(catalog: &Catalog, page: &Page, slots: &[RenderSlot]) -> PageView {
    let colors = |lines: &[LineRef]| {
        lines.iter().map(|l| catalog.line(*l).rgb).collect::<Vec<_>>()
    };

    PageView {
        number: page.number,
        left_panel: colors(&page.panels.left),
        right_panel: colors(&page.panels.right),
        rows: slots.iter().map(|slot| render_row(catalog, slot)).collect(),
    }
}

fn render_row(catalog: &Catalog, slot: &RenderSlot) -> RowView {
    let line = catalog.line(slot.line());
    let destination = catalog.station(slot.destination());

    match slot {
        RenderSlot::Single { slot, .. } => RowView {
            line: line.name.clone(),
            line_color: line.rgb,
            destination: destination.destination_display.clone(),
            destination_colors: vec![line.rgb],
            estimates: slot
                .estimates
                .iter()
                .take(MAX_ESTIMATES)
                .map(|e| estimate_view(e, line.rgb))
                .collect(),
            collapsed: false,
        },
        RenderSlot::Collapsed(collapsed) => RowView {
            line: line.name.clone(),
            line_color: line.rgb,
            destination: destination.name.clone(),
            destination_colors: collapsed.destination_colors.clone(),
            estimates: collapsed
                .estimates
                .iter()
                .take(MAX_ESTIMATES)
                .map(|m| estimate_view(&m.estimate, m.color))
                .collect(),
            collapsed: true,
        },
    }
}

fn estimate_view(estimate: &Estimate, color: Rgb) -> EstimateView {
    EstimateView {
        text: estimate.display(),
        color: if estimate.is_scheduled {
            SCHEDULED_GRAY
        } else {
            color
        },
        run_number: estimate.run_number,
        approaching: estimate.is_approaching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::binder::bind;
    use crate::domain::Direction;
    use crate::testing::{estimate, fixture_catalog, rgb_of};

    fn state_lake_board(catalog: &Catalog, estimates: Vec<Estimate>) -> BoardSnapshot {
        let station_ref = catalog.resolve_map_id(MapId(40260)).unwrap();
        let layout = catalog.layout_for(station_ref).unwrap();
        let bound = bind(layout, estimates);
        render_board(
            catalog,
            catalog.station(station_ref),
            layout,
            &bound,
            4,
            None,
        )
    }

    #[test]
    fn ordinary_row() {
        let catalog = fixture_catalog();
        let board = state_lake_board(
            &catalog,
            vec![
                estimate(&catalog, 1, "Brown", Direction::North, "Kimball", 3),
                estimate(&catalog, 2, "Brown", Direction::North, "Kimball", 11),
            ],
        );

        assert_eq!(board.station, "State/Lake");
        assert_eq!(board.map_id, Some(MapId(40260)));
        let row = &board.pages[0].rows[0];
        assert_eq!(row.line, "Brown");
        assert_eq!(row.destination, "Kimball");
        assert_eq!(row.destination_colors, vec![rgb_of("62361b")]);
        let texts: Vec<_> = row.estimates.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, [" 3", "11"]);
        assert!(row.estimates.iter().all(|e| e.color == rgb_of("62361b")));
    }

    #[test]
    fn at_most_three_estimates() {
        let catalog = fixture_catalog();
        let estimates = (0..5)
            .map(|i| estimate(&catalog, i, "Pink", Direction::South, "54th/Cermak", i * 4))
            .collect();
        let board = state_lake_board(&catalog, estimates);

        // Purple's row is hidden, so Pink is the third row
        let row = &board.pages[0].rows[2];
        assert_eq!(row.destination, "54th");
        let runs: Vec<_> = row.estimates.iter().map(|e| e.run_number).collect();
        assert_eq!(runs, [0, 1, 2]);
        assert!(row.estimates[0].approaching);
    }

    #[test]
    fn scheduled_estimates_are_gray() {
        let catalog = fixture_catalog();
        let mut scheduled = estimate(&catalog, 1, "Green", Direction::North, "Harlem/Lake", 8);
        scheduled.is_scheduled = true;
        scheduled.is_delayed = true;
        let board = state_lake_board(&catalog, vec![scheduled]);

        let row = &board.pages[0].rows[1];
        assert_eq!(row.line, "Green");
        assert_eq!(row.estimates[0].color, SCHEDULED_GRAY);
        assert_eq!(row.estimates[0].text, " 8 SD");
    }

    #[test]
    fn collapsed_row_uses_group_colors() {
        let catalog = fixture_catalog();
        let board = state_lake_board(
            &catalog,
            vec![
                estimate(&catalog, 1, "Orange", Direction::South, "Midway", 2),
                estimate(&catalog, 2, "Orange", Direction::North, "Loop", 4),
                estimate(&catalog, 3, "Green", Direction::South, "Ashland/63rd", 7),
                estimate(&catalog, 4, "Green", Direction::South, "Cottage Grove", 3),
                estimate(&catalog, 5, "Purple", Direction::South, "Loop", 6),
                estimate(&catalog, 6, "Pink", Direction::North, "Loop", 1),
            ],
        );

        let page = &board.pages[1];
        assert_eq!(page.rows.len(), 4);
        assert_eq!(page.left_panel, vec![rgb_of("f9461c"), rgb_of("009b3a")]);

        let green = &page.rows[2];
        assert!(green.collapsed);
        assert_eq!(green.destination, "63/A/C");
        let glyphs = green.glyphs();
        assert_eq!(glyphs.len(), 6);
        assert_eq!(
            glyphs[2],
            Glyph {
                ch: '/',
                color: rgb_of("ffffff")
            }
        );
        let colors: Vec<_> = green.estimates.iter().map(|e| e.color).collect();
        assert_eq!(colors, [rgb_of("7fcd9c"), rgb_of("009b3a")]);

        let loop_row = &page.rows[3];
        assert_eq!(loop_row.destination, "Loop");
        assert_eq!(loop_row.estimates[0].color, rgb_of("e27ea6"));
    }

    #[test]
    fn single_color_glyphs() {
        let row = RowView {
            line: "Orange".to_string(),
            line_color: rgb_of("f9461c"),
            destination: "Midway".to_string(),
            destination_colors: vec![rgb_of("f9461c")],
            estimates: Vec::new(),
            collapsed: false,
        };
        assert!(row.glyphs().iter().all(|g| g.color == rgb_of("f9461c")));
        assert_eq!(row.glyphs().len(), 6);
    }

    #[test]
    fn snapshot_serializes_colors_as_hex() {
        let catalog = fixture_catalog();
        let board = state_lake_board(
            &catalog,
            vec![estimate(&catalog, 1, "Brown", Direction::North, "Kimball", 3)],
        );
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["pages"][0]["rows"][0]["line_color"], "62361b");
        assert_eq!(json["pages"][0]["rows"][0]["estimates"][0]["text"], " 3");
        assert_eq!(json["map_id"], 40260);
    }
}
