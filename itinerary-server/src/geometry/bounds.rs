//! Bounding regions for fitting a map to an itinerary.

use serde::Serialize;
use tracing::trace;

use crate::domain::{Coordinate, Itinerary};
use crate::polyline;

/// An axis-aligned latitude/longitude box.
///
/// Extents are unpadded; any margin around the route is the renderer's
/// business. Boxes crossing the antimeridian are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// A zero-area box around one point.
    pub fn from_point(point: Coordinate) -> Self {
        Self {
            min_lat: point.lat,
            min_lon: point.lon,
            max_lat: point.lat,
            max_lon: point.lon,
        }
    }

    /// Grow the box to include `point`.
    pub fn extend(&mut self, point: Coordinate) {
        self.min_lat = self.min_lat.min(point.lat);
        self.min_lon = self.min_lon.min(point.lon);
        self.max_lat = self.max_lat.max(point.lat);
        self.max_lon = self.max_lon.max(point.lon);
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }
}

/// Smallest box covering every point, or `None` for no points.
pub fn bounds_of(points: impl IntoIterator<Item = Coordinate>) -> Option<BoundingBox> {
    let mut points = points.into_iter();
    let mut bbox = BoundingBox::from_point(points.next()?);
    for point in points {
        bbox.extend(point);
    }
    Some(bbox)
}

/// Box covering an itinerary's decoded geometry and optional endpoints.
///
/// Steps with empty or undecodable polylines contribute nothing. Returns
/// `None` when there is neither geometry nor an endpoint to cover.
pub fn compute_bounds(
    itinerary: &Itinerary,
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
) -> Option<BoundingBox> {
    let geometry = itinerary
        .steps()
        .iter()
        .filter(|step| !step.polyline().is_empty())
        .flat_map(|step| {
            let path = polyline::decode_or_empty(step.polyline());
            trace!(mode = %step.mode(), points = path.len(), "decoded step geometry");
            path
        });

    bounds_of(origin.into_iter().chain(destination).chain(geometry))
}
