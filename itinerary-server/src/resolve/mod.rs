//! Itinerary resolution with backend version fallback.
//!
//! Tries the legacy backend endpoint first and falls back to the canonical
//! one when the legacy attempt fails or finds nothing.

mod config;
mod fallback;
mod resolver;

pub use config::ResolverConfig;
pub use fallback::{Attempt, AttemptOutcome, Exhausted, try_in_order};
pub use resolver::{CancelReason, ItineraryBackend, ItineraryRequest, ResolveError, Resolver};
