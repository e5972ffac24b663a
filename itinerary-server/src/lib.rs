//! Itinerary resolution server.
//!
//! Finds public-transit itineraries through a backend that answers in one of
//! two schemas, and turns whichever one answered into a single canonical
//! multi-step model with map bounds and duration summaries.

pub mod backend;
pub mod domain;
pub mod geometry;
pub mod metrics;
pub mod normalize;
pub mod polyline;
pub mod resolve;
pub mod web;
