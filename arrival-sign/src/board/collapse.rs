//! Fitting a page onto the physical sign.
//!
//! The sign shows a fixed number of rows. Empty hideable slots are dropped
//! first; if the page is still too long, configured collapse groups merge
//! related slots into one row until it fits or no group applies.

use tracing::{debug, warn};

use crate::catalog::{CollapseGroup, Page};
use crate::domain::{Estimate, LineRef, Rgb, SlotKey, StationRef};

use super::binder::{BoundPage, BoundSlot};

/// Rows on the physical sign.
pub const DEFAULT_CAPACITY: usize = 4;

/// An estimate inside a merged row, with the color of the slot it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEstimate {
    pub estimate: Estimate,
    pub color: Rgb,
}

/// Several slots shown as one row.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedSlot {
    pub key: SlotKey,

    /// Slot indices merged into this row.
    pub members: Vec<usize>,

    /// One color per character of the destination name.
    pub destination_colors: Vec<Rgb>,

    /// Estimates of every member, soonest first.
    pub estimates: Vec<MemberEstimate>,
}

/// One row to render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderSlot {
    /// An ordinary slot, by index within its page.
    Single { index: usize, slot: BoundSlot },
    Collapsed(CollapsedSlot),
}

impl RenderSlot {
    pub fn key(&self) -> SlotKey {
        match self {
            RenderSlot::Single { slot, .. } => slot.key,
            RenderSlot::Collapsed(collapsed) => collapsed.key,
        }
    }

    pub fn line(&self) -> LineRef {
        self.key().line
    }

    pub fn destination(&self) -> StationRef {
        self.key().destination
    }

    /// Estimates shown in this row, soonest first.
    pub fn estimates(&self) -> Vec<&Estimate> {
        match self {
            RenderSlot::Single { slot, .. } => slot.estimates.iter().collect(),
            RenderSlot::Collapsed(collapsed) => {
                collapsed.estimates.iter().map(|m| &m.estimate).collect()
            }
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, RenderSlot::Collapsed(_))
    }

    fn single_index(&self) -> Option<usize> {
        match self {
            RenderSlot::Single { index, .. } => Some(*index),
            RenderSlot::Collapsed(_) => None,
        }
    }
}

/// Reduce a bound page to the rows to render.
///
/// Collapse groups are tried in order and only while the page is over
/// `capacity`. A group applies only if all of its members are still shown
/// as ordinary rows; the merged row takes the place of its lowest member.
/// The result is never truncated.
pub fn collapse(page: &Page, bound: &BoundPage, capacity: usize) -> Vec<RenderSlot> {
    let mut rows: Vec<RenderSlot> = bound
        .slots
        .iter()
        .enumerate()
        .filter(|(index, slot)| !(page.is_hideable(*index) && slot.is_empty()))
        .map(|(index, slot)| RenderSlot::Single {
            index,
            slot: slot.clone(),
        })
        .collect();

    for (g, group) in page.collapse.iter().enumerate() {
        if rows.len() <= capacity {
            break;
        }

        let positions: Option<Vec<usize>> = group
            .members
            .iter()
            .map(|member| rows.iter().position(|r| r.single_index() == Some(*member)))
            .collect();
        let Some(mut positions) = positions else {
            debug!(page = page.number, group = g, "collapse group not applicable");
            continue;
        };

        // Rows are in slot order, so the first position is the lowest member.
        positions.sort_unstable();
        let Some((&lowest, rest)) = positions.split_first() else {
            continue;
        };
        rows[lowest] = RenderSlot::Collapsed(merge(group, bound));
        for &position in rest.iter().rev() {
            rows.remove(position);
        }
    }

    if rows.len() > capacity {
        warn!(
            page = page.number,
            rows = rows.len(),
            capacity,
            "page does not fit the sign"
        );
    }

    rows
}

fn merge(group: &CollapseGroup, bound: &BoundPage) -> CollapsedSlot {
    let mut estimates: Vec<MemberEstimate> = group
        .members
        .iter()
        .zip(&group.member_colors)
        .flat_map(|(&member, &color)| {
            bound.slots[member]
                .estimates
                .iter()
                .map(move |estimate| MemberEstimate {
                    estimate: estimate.clone(),
                    color,
                })
        })
        .collect();
    estimates.sort_by_key(|m| m.estimate.minutes_away);

    CollapsedSlot {
        key: group.key,
        members: group.members.clone(),
        destination_colors: group.destination_colors.clone(),
        estimates,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::board::binder::bind;
    use crate::domain::{Direction, MapId};
    use crate::testing::{estimate, fixture_catalog};
    use proptest::prelude::*;

    const PAGE_TWO: [(&str, Direction, &str); 6] = [
        ("Orange", Direction::South, "Midway"),
        ("Orange", Direction::North, "Loop"),
        ("Green", Direction::South, "Ashland/63rd"),
        ("Green", Direction::South, "Cottage Grove"),
        ("Purple", Direction::South, "Loop"),
        ("Pink", Direction::North, "Loop"),
    ];

    proptest! {
        #[test]
        fn collapse_invariants(
            occupied in prop::collection::vec(any::<bool>(), 6),
            capacity in 1usize..8,
        ) {
            let catalog = fixture_catalog();
            let layout = catalog
                .layout_for(catalog.resolve_map_id(MapId(40260)).unwrap())
                .unwrap();
            let estimates = PAGE_TWO
                .iter()
                .zip(&occupied)
                .enumerate()
                .filter(|(_, (_, set))| **set)
                .map(|(i, ((line, dir, dest), _))| {
                    estimate(&catalog, i as u32, line, *dir, dest, 3)
                })
                .collect();
            let bound = bind(layout, estimates);
            let page = &layout.pages[1];
            let rows = collapse(page, &bound.pages[1], capacity);

            // No estimate is lost or duplicated
            let shown: usize = rows.iter().map(|r| r.estimates().len()).sum();
            prop_assert_eq!(shown, occupied.iter().filter(|s| **s).count());

            // Only hideable slots without estimates disappear
            let mut covered: Vec<usize> = rows
                .iter()
                .flat_map(|r| match r {
                    RenderSlot::Single { index, .. } => vec![*index],
                    RenderSlot::Collapsed(c) => c.members.clone(),
                })
                .collect();
            covered.sort_unstable();
            let expected: Vec<usize> = (0..6)
                .filter(|i| occupied[*i] || !page.is_hideable(*i))
                .collect();
            prop_assert_eq!(covered, expected);

            // Groups are applied only when needed
            let visible = expected_len(page, &occupied);
            if visible <= capacity {
                prop_assert!(rows.iter().all(|r| !r.is_collapsed()));
            }
        }
    }

    fn expected_len(page: &Page, occupied: &[bool]) -> usize {
        (0..occupied.len())
            .filter(|i| occupied[*i] || !page.is_hideable(*i))
            .count()
    }
}
