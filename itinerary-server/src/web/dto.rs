//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::backend::{ItineraryResponse, Origin, Place, Stop};
use crate::domain::{Coordinate, Itinerary};
use crate::geometry::{BoundingBox, bounds_of, compute_bounds};
use crate::metrics::ItineraryMetrics;
use crate::resolve::ItineraryRequest;

/// Query for `GET /api/itinerary`.
///
/// Everything is optional here so that missing or malformed values get a
/// JSON error instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ItineraryQuery {
    /// Destination address
    pub dest_add: Option<String>,

    /// City identifier
    pub city_id: Option<String>,

    /// Origin address, used when no coordinates are given
    pub start_add: Option<String>,

    /// Origin latitude
    pub start_lat: Option<String>,

    /// Origin longitude
    pub start_lon: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ItineraryQuery {
    /// Build a resolver request.
    ///
    /// Coordinates win over an address when both are supplied, since only
    /// coordinates can be retried against the canonical endpoint.
    pub fn to_request(&self) -> Result<ItineraryRequest, String> {
        let (Some(dest_add), Some(city_id)) = (non_empty(&self.dest_add), non_empty(&self.city_id))
        else {
            return Err("Missing required parameters: dest_add and city_id".to_string());
        };

        let city_id: u32 = city_id
            .parse()
            .map_err(|_| format!("Invalid city_id: {city_id}"))?;

        let origin = match (non_empty(&self.start_lat), non_empty(&self.start_lon)) {
            (Some(lat), Some(lon)) => {
                let lat: f64 = lat
                    .parse()
                    .map_err(|_| format!("Invalid start_lat: {lat}"))?;
                let lon: f64 = lon
                    .parse()
                    .map_err(|_| format!("Invalid start_lon: {lon}"))?;
                Origin::Coordinates(Coordinate::new(lat, lon).map_err(|e| e.to_string())?)
            }
            _ => match non_empty(&self.start_add) {
                Some(address) => Origin::Address(address.to_string()),
                None => {
                    return Err(
                        "Missing origin: start_add or start_lat and start_lon".to_string()
                    );
                }
            },
        };

        Ok(ItineraryRequest::new(origin, dest_add, city_id))
    }
}

/// Render hints for one itinerary.
#[derive(Debug, Serialize)]
pub struct ItinerarySummary {
    /// Map extent covering the route and both ends
    pub bounds: Option<BoundingBox>,

    /// Durations and counts for the itinerary card
    pub metrics: ItineraryMetrics,
}

/// Response for `GET /api/itinerary`.
#[derive(Debug, Serialize)]
pub struct ItineraryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Place>,

    pub destination: Place,

    /// Canonical itineraries, whichever backend schema answered
    pub v2_itin: Vec<Itinerary>,

    /// One summary per entry of `v2_itin`, in the same order
    pub summaries: Vec<ItinerarySummary>,
}

impl ItineraryPayload {
    /// Assemble the payload from a resolved response and its normalized
    /// itineraries.
    ///
    /// `origin` is used for map bounds when the backend did not echo a start.
    pub fn new(
        response: ItineraryResponse,
        itineraries: Vec<Itinerary>,
        origin: Option<Coordinate>,
    ) -> Self {
        let start_point = response.start.as_ref().map(Place::coordinate).or(origin);
        let end_point = Some(response.destination.coordinate());

        let summaries = itineraries
            .iter()
            .map(|itinerary| ItinerarySummary {
                bounds: compute_bounds(itinerary, start_point, end_point),
                metrics: ItineraryMetrics::compute(itinerary),
            })
            .collect();

        Self {
            start: response.start,
            destination: response.destination,
            v2_itin: itineraries,
            summaries,
        }
    }
}

/// Query for `GET /api/line-details`.
#[derive(Debug, Default, Deserialize)]
pub struct LineDetailsQuery {
    pub line_id: Option<String>,
}

impl LineDetailsQuery {
    pub fn line_id(&self) -> Result<u32, String> {
        let raw = non_empty(&self.line_id).ok_or_else(|| "Missing line_id".to_string())?;
        raw.parse().map_err(|_| format!("Invalid line_id: {raw}"))
    }
}

/// Response for `GET /api/line-stops`.
#[derive(Debug, Serialize)]
pub struct LineStopsPayload {
    pub line_id: u32,

    /// Stops in route order
    pub stops: Vec<Stop>,

    /// Map extent covering every stop
    pub bounds: Option<BoundingBox>,
}

impl LineStopsPayload {
    pub fn new(line_id: u32, stops: Vec<Stop>) -> Self {
        let bounds = bounds_of(stops.iter().map(Stop::coordinate));
        Self {
            line_id,
            stops,
            bounds,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Underlying cause, when there is one worth showing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
