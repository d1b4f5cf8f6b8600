//! Web layer for the PTV provider.
//!
//! Exposes nearby stops, departure boards and location search as JSON.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
