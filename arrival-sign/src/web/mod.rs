//! Web layer for the arrival sign.
//!
//! Serves the latest board snapshot as JSON and as an HTML rendering of the
//! physical sign.

mod routes;
mod state;
mod templates;

pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::BoardTemplate;
