//! Web layer for the EV map.
//!
//! Serves station pages as JSON or HTML, plus network listings.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
