//! Application state for the web layer.

use std::sync::Arc;

use crate::board::SharedBoard;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Latest published snapshot
    pub board: SharedBoard,

    /// Header shown before the first snapshot arrives
    pub station: Arc<str>,
}

impl AppState {
    pub fn new(board: SharedBoard, station: impl Into<Arc<str>>) -> Self {
        Self {
            board,
            station: station.into(),
        }
    }
}
