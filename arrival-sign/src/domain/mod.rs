//! Domain types for the arrival sign.
//!
//! Identifiers, colors and directions enforce their invariants at
//! construction time; station and line handles are only ever produced by a
//! loaded [`Catalog`](crate::catalog::Catalog).

mod color;
mod direction;
mod estimate;
mod ids;

pub use color::{InvalidRgb, Rgb};
pub use direction::{ByDirection, Direction, InvalidDirection};
pub use estimate::{Estimate, Position, SlotKey};
pub use ids::{InvalidId, LineRef, MapId, StationRef, StopId};
