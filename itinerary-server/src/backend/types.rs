//! Backend response DTOs.
//!
//! These map directly onto the backend's JSON. Legacy line records are
//! decoded one at a time and field by field leniently, so that one
//! incomplete line cannot sink a whole response.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{Coordinate, Itinerary, lenient, null_as_default};

use super::error::BackendError;

/// A named place resolved by the backend (trip start or destination).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// A stop along a legacy line ride.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyStop {
    #[serde(default, deserialize_with = "lenient")]
    pub id: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub eta_min_from_start: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub time: String,
}

/// One single-ride option in the legacy schema.
///
/// Every field is decoded leniently: a missing or mistyped value becomes
/// its default instead of failing the line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyLine {
    #[serde(default, deserialize_with = "lenient")]
    pub line_id: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub route_name: String,
    /// Clock time the rider boards at the first stop.
    #[serde(default, deserialize_with = "lenient")]
    pub start_stop_arrival_time: String,
    /// Clock time the rider alights.
    #[serde(default, deserialize_with = "lenient")]
    pub arrival_time: String,
    #[serde(default, deserialize_with = "lenient")]
    pub ride_eta_min: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub stops: Vec<LegacyStop>,
    #[serde(default, deserialize_with = "lenient")]
    pub walk_to_start_polyline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub walk_to_dest_polyline: Option<String>,
}

impl LegacyLine {
    /// Walk geometry to the boarding stop, if any was sent.
    pub fn walk_to_start(&self) -> Option<&str> {
        self.walk_to_start_polyline.as_deref().filter(|p| !p.is_empty())
    }

    /// Walk geometry from the alighting stop, if any was sent.
    pub fn walk_to_dest(&self) -> Option<&str> {
        self.walk_to_dest_polyline.as_deref().filter(|p| !p.is_empty())
    }
}

/// Itinerary payload as either endpoint sends it, after envelope unwrapping.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItineraryResponse {
    #[serde(default)]
    pub start: Option<Place>,
    #[serde(default)]
    pub destination: Option<Place>,
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<u32>,
    /// Kept raw so each line is decoded on its own.
    #[serde(default)]
    pub lines: Option<Vec<Value>>,
    #[serde(default)]
    pub v2_itin: Option<Vec<Itinerary>>,
}

/// Decode legacy lines one by one, dropping entries that are not line
/// records at all.
fn decode_lines(raw: Vec<Value>) -> Vec<LegacyLine> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed legacy line");
                None
            }
        })
        .collect()
}

/// The itineraries in a response, in whichever schema the backend used.
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryBody {
    /// Single-ride lines from the legacy endpoint.
    Legacy { count: u32, lines: Vec<LegacyLine> },
    /// Multi-step itineraries, already in canonical form.
    Canonical(Vec<Itinerary>),
}

/// A decoded itinerary response.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryResponse {
    pub start: Option<Place>,
    pub destination: Place,
    pub body: ItineraryBody,
}

impl ItineraryResponse {
    /// Classify a raw payload.
    ///
    /// A non-empty `v2_itin` list wins; otherwise `lines` makes it legacy.
    /// An empty `v2_itin` with no `lines` is an empty canonical response.
    pub fn from_raw(raw: RawItineraryResponse) -> Result<Self, BackendError> {
        let destination = raw
            .destination
            .ok_or_else(|| BackendError::DataShape("missing field `destination`".into()))?;

        let body = match (raw.v2_itin, raw.lines) {
            (Some(itins), _) if !itins.is_empty() => ItineraryBody::Canonical(itins),
            (_, Some(raw_lines)) => {
                let count = raw.count.unwrap_or(raw_lines.len() as u32);
                let lines = decode_lines(raw_lines);
                if count as usize != lines.len() {
                    warn!(
                        count,
                        lines = lines.len(),
                        "legacy count disagrees with lines; using lines"
                    );
                }
                ItineraryBody::Legacy { count, lines }
            }
            (Some(itins), None) => ItineraryBody::Canonical(itins),
            (None, None) => {
                return Err(BackendError::DataShape(
                    "response has neither `lines` nor `v2_itin`".into(),
                ));
            }
        };

        Ok(Self {
            start: raw.start,
            destination,
            body,
        })
    }

    /// Number of itineraries offered, in either schema.
    pub fn itinerary_count(&self) -> usize {
        match &self.body {
            ItineraryBody::Legacy { lines, .. } => lines.len(),
            ItineraryBody::Canonical(itins) => itins.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.itinerary_count() == 0
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self.body, ItineraryBody::Canonical(_))
    }
}

/// A transit line as listed by `/station/lines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusLine {
    pub id: u32,
    pub route_name: String,
    /// Encoded route geometry, when the backend has one.
    pub polyline: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_address: String,
}

/// A stop served by a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}
