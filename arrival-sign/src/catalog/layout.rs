//! Station sign layouts.
//!
//! A layout is the physical configuration of a sign: which (line,
//! direction, destination) rows exist on each page, which rows disappear
//! when empty, and which rows may be merged when a page is too full.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{LineRef, Rgb, SlotKey};

use super::Catalog;
use super::defs::{CollapseDef, LayoutDef, PageDef, PatternDef};
use super::error::ConfigError;

/// Location of a slot within a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotPosition {
    pub page: usize,
    pub slot: usize,
}

/// A set of slots that may be shown as one merged row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseGroup {
    /// Member slot indices, as configured.
    pub members: Vec<usize>,

    /// Identity of the merged row.
    pub key: SlotKey,

    /// One color per character of the merged destination name.
    pub destination_colors: Vec<Rgb>,

    /// One color per member, parallel to `members`.
    pub member_colors: Vec<Rgb>,
}

/// Line colors for the left and right panels of the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    pub left: Vec<LineRef>,
    pub right: Vec<LineRef>,
}

/// One frame of the sign, shown in rotation with the layout's other pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub slots: Vec<SlotKey>,

    /// Slot indices hidden while they have no estimates.
    pub hide: BTreeSet<usize>,

    /// Collapse groups, tried in order.
    pub collapse: Vec<CollapseGroup>,

    pub panels: Panels,
}

impl Page {
    pub fn is_hideable(&self, slot: usize) -> bool {
        self.hide.contains(&slot)
    }
}

/// The sign configuration for stations served by one set of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Lines served, in rank order.
    pub lines: Vec<LineRef>,
    pub pages: Vec<Page>,

    /// Slot identity → position. Identities are unique within a layout.
    index: HashMap<SlotKey, SlotPosition>,
}

impl Layout {
    /// Where the slot with this identity lives, if the sign has one.
    pub fn position_of(&self, key: &SlotKey) -> Option<SlotPosition> {
        self.index.get(key).copied()
    }

    /// Every slot of every page, in page order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotPosition, &SlotKey)> {
        self.pages.iter().enumerate().flat_map(|(page, p)| {
            p.slots
                .iter()
                .enumerate()
                .map(move |(slot, key)| (SlotPosition { page, slot }, key))
        })
    }

    /// Whether this layout serves exactly the given set of lines.
    pub fn serves(&self, lines: &[LineRef]) -> bool {
        let mine: BTreeSet<_> = self.lines.iter().collect();
        let theirs: BTreeSet<_> = lines.iter().collect();
        mine == theirs
    }

    /// Resolve and validate a layout definition against the catalog.
    pub(crate) fn from_def(
        layout: usize,
        def: &LayoutDef,
        catalog: &Catalog,
    ) -> Result<Self, ConfigError> {
        let mut lines = def
            .lines
            .iter()
            .map(|name| {
                catalog
                    .resolve_line(name)
                    .map_err(ConfigError::lookup(format!("layout {layout}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        lines.sort();
        lines.dedup();

        let pages = def
            .pages
            .iter()
            .map(|page| build_page(layout, page, &lines, catalog))
            .collect::<Result<Vec<_>, _>>()?;

        let mut index = HashMap::new();
        for (page_idx, page) in pages.iter().enumerate() {
            for (slot, key) in page.slots.iter().enumerate() {
                let position = SlotPosition {
                    page: page_idx,
                    slot,
                };
                if index.insert(*key, position).is_some() {
                    return Err(ConfigError::InvalidPage {
                        layout,
                        page: page.number,
                        message: format!(
                            "slot {slot} ({} {} to {}) duplicates an earlier slot",
                            catalog.line(key.line).name,
                            key.direction,
                            catalog.station(key.destination).name,
                        ),
                    });
                }
            }
        }

        Ok(Self {
            lines,
            pages,
            index,
        })
    }
}

fn build_page(
    layout: usize,
    def: &PageDef,
    layout_lines: &[LineRef],
    catalog: &Catalog,
) -> Result<Page, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidPage {
        layout,
        page: def.page,
        message,
    };
    let context = |what: &str| format!("layout {layout}, page {}, {what}", def.page);

    let slots = def
        .patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| slot_key(pattern, catalog, &context(&format!("slot {i}"))))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(&bad) = def.hide.iter().find(|&&i| i >= slots.len()) {
        return Err(invalid(format!("hide index {bad} is out of range")));
    }

    let collapse = def
        .collapse
        .iter()
        .enumerate()
        .map(|(g, group)| {
            build_group(
                group,
                slots.len(),
                catalog,
                &context(&format!("collapse group {g}")),
            )
            .map_err(|e| match e {
                GroupError::Config(e) => e,
                GroupError::Invalid(message) => {
                    invalid(format!("collapse group {g}: {message}"))
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let panels = match &def.panels {
        None => Panels {
            left: layout_lines.to_vec(),
            right: layout_lines.to_vec(),
        },
        Some(panels) => {
            let resolve = |names: &[String], side: &str| {
                names
                    .iter()
                    .map(|n| {
                        catalog
                            .resolve_line(n)
                            .map_err(ConfigError::lookup(context(&format!("{side} panel"))))
                    })
                    .collect::<Result<Vec<_>, _>>()
            };
            Panels {
                left: resolve(&panels.left, "left")?,
                right: resolve(&panels.right, "right")?,
            }
        }
    };

    Ok(Page {
        number: def.page,
        slots,
        hide: def.hide.iter().copied().collect(),
        collapse,
        panels,
    })
}

fn slot_key(
    pattern: &PatternDef,
    catalog: &Catalog,
    context: &str,
) -> Result<SlotKey, ConfigError> {
    Ok(SlotKey {
        line: catalog
            .resolve_line(&pattern.line)
            .map_err(ConfigError::lookup(context))?,
        direction: pattern.direction,
        destination: catalog
            .resolve_spec(&pattern.destination)
            .map_err(ConfigError::lookup(context))?,
    })
}

enum GroupError {
    Config(ConfigError),
    Invalid(String),
}

fn build_group(
    def: &CollapseDef,
    slot_count: usize,
    catalog: &Catalog,
    context: &str,
) -> Result<CollapseGroup, GroupError> {
    if def.subpatterns.len() < 2 {
        return Err(GroupError::Invalid("needs at least two members".into()));
    }
    if let Some(&bad) = def.subpatterns.iter().find(|&&i| i >= slot_count) {
        return Err(GroupError::Invalid(format!("member {bad} is out of range")));
    }
    let distinct: BTreeSet<_> = def.subpatterns.iter().collect();
    if distinct.len() != def.subpatterns.len() {
        return Err(GroupError::Invalid("members must be distinct".into()));
    }
    if def.subpattern_rgb.len() != def.subpatterns.len() {
        return Err(GroupError::Invalid(format!(
            "{} member colors for {} members",
            def.subpattern_rgb.len(),
            def.subpatterns.len()
        )));
    }

    let key = slot_key(
        &PatternDef {
            line: def.line.clone(),
            direction: def.direction,
            destination: def.destination.clone(),
        },
        catalog,
        context,
    )
    .map_err(GroupError::Config)?;

    let name_chars = catalog.station(key.destination).name.chars().count();
    if def.destination_rgb.len() != name_chars {
        return Err(GroupError::Invalid(format!(
            "{} destination colors for a {name_chars}-character name",
            def.destination_rgb.len()
        )));
    }

    Ok(CollapseGroup {
        members: def.subpatterns.clone(),
        key,
        destination_colors: def.destination_rgb.clone(),
        member_colors: def.subpattern_rgb.clone(),
    })
}
