//! Canonical itinerary model.
//!
//! Every downstream consumer (map renderer, timeline, metrics) works with
//! these types, whichever backend schema produced the data.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, null_as_default};

/// Mode of travel for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepMode {
    Walk,
    Transit,
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepMode::Walk => f.write_str("WALK"),
            StepMode::Transit => f.write_str("TRANSIT"),
        }
    }
}

/// A walking leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkStep {
    pub duration_seconds: f64,
    /// Zero when the backend leaves it out.
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance_meters: f64,
    /// Encoded path; empty when no geometry is known.
    pub polyline: String,
    pub start_time: String,
    pub end_time: String,
    pub start_stop_name: String,
    pub end_stop_name: String,
}

/// A ride on one transit line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitStep {
    pub duration_seconds: f64,
    /// Encoded path; empty when no geometry is known.
    pub polyline: String,
    pub start_time: String,
    pub end_time: String,
    pub start_stop_name: String,
    pub end_stop_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_stops: u32,
}

/// One contiguous segment of an itinerary.
///
/// On the wire this is a flat object with a `"type"` field of `"WALK"` or
/// `"TRANSIT"`; line fields only exist on transit steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ItineraryStep {
    Walk(WalkStep),
    Transit(TransitStep),
}

impl ItineraryStep {
    pub fn mode(&self) -> StepMode {
        match self {
            ItineraryStep::Walk(_) => StepMode::Walk,
            ItineraryStep::Transit(_) => StepMode::Transit,
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        match self {
            ItineraryStep::Walk(w) => w.duration_seconds,
            ItineraryStep::Transit(t) => t.duration_seconds,
        }
    }

    pub fn polyline(&self) -> &str {
        match self {
            ItineraryStep::Walk(w) => &w.polyline,
            ItineraryStep::Transit(t) => &t.polyline,
        }
    }

    pub fn start_time(&self) -> &str {
        match self {
            ItineraryStep::Walk(w) => &w.start_time,
            ItineraryStep::Transit(t) => &t.start_time,
        }
    }

    pub fn end_time(&self) -> &str {
        match self {
            ItineraryStep::Walk(w) => &w.end_time,
            ItineraryStep::Transit(t) => &t.end_time,
        }
    }

    pub fn start_stop_name(&self) -> &str {
        match self {
            ItineraryStep::Walk(w) => &w.start_stop_name,
            ItineraryStep::Transit(t) => &t.start_stop_name,
        }
    }

    pub fn end_stop_name(&self) -> &str {
        match self {
            ItineraryStep::Walk(w) => &w.end_stop_name,
            ItineraryStep::Transit(t) => &t.end_stop_name,
        }
    }

    /// The transit leg, if this is one.
    pub fn as_transit(&self) -> Option<&TransitStep> {
        match self {
            ItineraryStep::Transit(t) => Some(t),
            ItineraryStep::Walk(_) => None,
        }
    }
}

/// A complete door-to-door option: a non-empty ordered list of steps.
///
/// Itineraries built here via [`Itinerary::from_steps`] derive their
/// duration and times from the steps. Itineraries received from the
/// canonical backend keep the totals the backend sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItineraryRepr")]
pub struct Itinerary {
    duration_seconds: f64,
    start_time: String,
    end_time: String,
    steps: Vec<ItineraryStep>,
}

/// Wire shape, validated into [`Itinerary`].
#[derive(Deserialize)]
struct ItineraryRepr {
    duration_seconds: f64,
    start_time: String,
    end_time: String,
    steps: Vec<ItineraryStep>,
}

impl TryFrom<ItineraryRepr> for Itinerary {
    type Error = DomainError;

    fn try_from(repr: ItineraryRepr) -> Result<Self, Self::Error> {
        if repr.steps.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        Ok(Self {
            duration_seconds: repr.duration_seconds,
            start_time: repr.start_time,
            end_time: repr.end_time,
            steps: repr.steps,
        })
    }
}

impl Itinerary {
    /// Build an itinerary from its steps.
    ///
    /// Duration is the sum of step durations; start and end times come from
    /// the first and last steps.
    pub fn from_steps(steps: Vec<ItineraryStep>) -> Result<Self, DomainError> {
        let (first, last) = match (steps.first(), steps.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(DomainError::EmptyItinerary),
        };

        Ok(Self {
            duration_seconds: steps.iter().map(ItineraryStep::duration_seconds).sum(),
            start_time: first.start_time().to_string(),
            end_time: last.end_time().to_string(),
            steps,
        })
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    pub fn steps(&self) -> &[ItineraryStep] {
        &self.steps
    }

    /// Step modes in order, e.g. `[Walk, Transit, Walk]`.
    pub fn modes(&self) -> Vec<StepMode> {
        self.steps.iter().map(ItineraryStep::mode).collect()
    }

    /// Transit legs in order.
    pub fn transit_steps(&self) -> impl Iterator<Item = &TransitStep> {
        self.steps.iter().filter_map(ItineraryStep::as_transit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(start: &str, end: &str, secs: f64) -> ItineraryStep {
        ItineraryStep::Walk(WalkStep {
            duration_seconds: secs,
            distance_meters: 250.0,
            polyline: String::new(),
            start_time: start.into(),
            end_time: end.into(),
            start_stop_name: "Home".into(),
            end_stop_name: "Stop A".into(),
        })
    }

    fn transit(start: &str, end: &str, secs: f64) -> ItineraryStep {
        ItineraryStep::Transit(TransitStep {
            duration_seconds: secs,
            polyline: String::new(),
            start_time: start.into(),
            end_time: end.into(),
            start_stop_name: "Stop A".into(),
            end_stop_name: "Stop B".into(),
            line_id: 7,
            line_name: "L7".into(),
            num_stops: 4,
        })
    }

    #[test]
    fn from_steps_derives_totals() {
        let itin = Itinerary::from_steps(vec![
            walk("10:00", "10:05", 300.0),
            transit("10:05", "10:25", 1200.0),
        ])
        .unwrap();

        assert_eq!(itin.duration_seconds(), 1500.0);
        assert_eq!(itin.start_time(), "10:00");
        assert_eq!(itin.end_time(), "10:25");
        assert_eq!(itin.modes(), vec![StepMode::Walk, StepMode::Transit]);
        assert_eq!(itin.transit_steps().count(), 1);
    }

    #[test]
    fn from_steps_rejects_empty() {
        assert_eq!(
            Itinerary::from_steps(vec![]),
            Err(DomainError::EmptyItinerary)
        );
    }

    #[test]
    fn step_wire_format_is_flat_and_tagged() {
        let json = serde_json::to_value(transit("10:05", "10:25", 1200.0)).unwrap();
        assert_eq!(json["type"], "TRANSIT");
        assert_eq!(json["line_id"], 7);
        assert_eq!(json["num_stops"], 4);

        let json = serde_json::to_value(walk("10:00", "10:05", 300.0)).unwrap();
        assert_eq!(json["type"], "WALK");
        assert!(json.get("line_id").is_none());
    }

    #[test]
    fn deserializes_canonical_payload() {
        let json = r#"{
            "duration_seconds": 1500,
            "start_time": "10:00",
            "end_time": "10:25",
            "steps": [
                {"type": "WALK", "duration_seconds": 300, "distance_meters": 250,
                 "polyline": "", "start_time": "10:00", "end_time": "10:05",
                 "start_stop_name": "Home", "end_stop_name": "Stop A"},
                {"type": "TRANSIT", "duration_seconds": 1200, "polyline": "",
                 "start_time": "10:05", "end_time": "10:25",
                 "start_stop_name": "Stop A", "end_stop_name": "Stop B",
                 "line_id": 7, "line_name": "L7", "num_stops": 4}
            ]
        }"#;

        let itin: Itinerary = serde_json::from_str(json).unwrap();
        let expected = Itinerary::from_steps(vec![
            walk("10:00", "10:05", 300.0),
            transit("10:05", "10:25", 1200.0),
        ])
        .unwrap();
        assert_eq!(itin, expected);
    }

    #[test]
    fn deserialize_rejects_empty_steps() {
        let json = r#"{"duration_seconds": 0, "start_time": "10:00",
                       "end_time": "10:00", "steps": []}"#;
        let err = serde_json::from_str::<Itinerary>(json).unwrap_err();
        assert!(err.to_string().contains("at least one step"));
    }

    #[test]
    fn walk_with_line_fields_is_not_a_transit() {
        // Unknown fields on a walk are ignored rather than turning it into a ride.
        let json = r#"{"type": "WALK", "duration_seconds": 60, "distance_meters": 80,
                       "polyline": "", "start_time": "10:00", "end_time": "10:01",
                       "start_stop_name": "A", "end_stop_name": "B", "line_id": 3}"#;
        let step: ItineraryStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.mode(), StepMode::Walk);
        assert!(step.as_transit().is_none());
    }
}
