//! Building the sign from estimates.
//!
//! Each refresh runs the same pipeline over fresh values:
//!
//! 1. [`bind`] estimates to the slots of the station's layout
//! 2. [`collapse`] each page to fit the sign
//! 3. [`render_board`] the rows into a [`BoardSnapshot`]
//!
//! [`BoardRefresher`] drives the pipeline from an arrivals source and
//! publishes snapshots through a [`SharedBoard`].

mod binder;
mod collapse;
mod refresh;
mod render;

pub use binder::{BoundLayout, BoundPage, BoundSlot, bind};
pub use collapse::{CollapsedSlot, DEFAULT_CAPACITY, MemberEstimate, RenderSlot, collapse};
pub use refresh::{BoardRefresher, CycleError, SharedBoard};
pub use render::{
    BoardSnapshot, EstimateView, Glyph, MAX_ESTIMATES, PageView, RowView, SCHEDULED_GRAY,
    render_board, render_page,
};
