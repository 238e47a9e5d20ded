//! Binding estimates to sign slots.

use tracing::debug;

use crate::catalog::Layout;
use crate::domain::{Estimate, SlotKey};

/// A slot with the estimates bound to it this cycle, soonest first.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSlot {
    pub key: SlotKey,
    pub estimates: Vec<Estimate>,
}

impl BoundSlot {
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}

/// The slots of one page, parallel to [`Page::slots`](crate::catalog::Page::slots).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundPage {
    pub slots: Vec<BoundSlot>,
}

/// A whole layout with this cycle's estimates bound.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundLayout {
    /// Parallel to [`Layout::pages`].
    pub pages: Vec<BoundPage>,

    /// Estimates that matched no slot.
    pub dropped: usize,
}

/// Attach each estimate to the slot with the same (line, direction,
/// destination), sorting every slot's estimates by minutes away.
///
/// The sort is stable, so estimates due at the same minute keep their feed
/// order. Estimates without a matching slot (including those with no
/// direction) are dropped.
pub fn bind(layout: &Layout, estimates: Vec<Estimate>) -> BoundLayout {
    let mut pages: Vec<BoundPage> = layout
        .pages
        .iter()
        .map(|page| BoundPage {
            slots: page
                .slots
                .iter()
                .map(|key| BoundSlot {
                    key: *key,
                    estimates: Vec::new(),
                })
                .collect(),
        })
        .collect();

    let mut dropped = 0;
    for estimate in estimates {
        match estimate.slot_key().and_then(|key| layout.position_of(&key)) {
            Some(position) => pages[position.page].slots[position.slot]
                .estimates
                .push(estimate),
            None => {
                debug!(
                    run = estimate.run_number,
                    direction = ?estimate.direction,
                    "no slot for estimate"
                );
                dropped += 1;
            }
        }
    }

    for slot in pages.iter_mut().flat_map(|page| page.slots.iter_mut()) {
        slot.estimates.sort_by_key(|e| e.minutes_away);
    }

    BoundLayout { pages, dropped }
}
