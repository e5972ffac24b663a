//! Geographic coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A point on the globe, in decimal degrees.
///
/// Decoded polylines can produce out-of-range values from corrupt input, so
/// the fields are public and validity is checked separately via
/// [`Coordinate::is_valid`]. Use [`Coordinate::new`] when the input should be
/// rejected instead.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::Coordinate;
///
/// let casablanca = Coordinate::new(33.5731, -7.5898).unwrap();
/// assert!(casablanca.is_valid());
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, -180.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting latitudes outside [-90, 90] and
    /// longitudes outside [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        let coord = Self { lat, lon };
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(DomainError::InvalidCoordinate { lat, lon })
        }
    }

    /// Whether both axes are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}
