//! Geometry derived from itineraries, for map-fitting and walk estimates.

mod bounds;
mod distance;

pub use bounds::{BoundingBox, bounds_of, compute_bounds};
pub use distance::{haversine_meters, path_length_meters};
