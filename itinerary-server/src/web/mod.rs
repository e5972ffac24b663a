//! Web layer for the itinerary server.
//!
//! Provides JSON endpoints for resolving itineraries and looking up lines.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
