//! Domain types for the itinerary pipeline.
//!
//! This module contains the canonical model that every consumer depends on.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod error;
mod itinerary;
mod time;
mod wire;

pub use coordinate::Coordinate;
pub use error::DomainError;
pub use itinerary::{Itinerary, ItineraryStep, StepMode, TransitStep, WalkStep};
pub use time::{TimeError, WallTime};
pub(crate) use wire::{lenient, null_as_default};
