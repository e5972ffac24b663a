//! Lifting legacy line records into canonical itineraries.

use crate::backend::LegacyLine;
use crate::domain::{DomainError, Itinerary, ItineraryStep, TransitStep, WalkStep};

use super::NormalizeConfig;
use super::walk::estimate;

pub(super) const UNKNOWN_START: &str = "Unknown Start";
pub(super) const UNKNOWN_END: &str = "Unknown End";

/// Names of the trip's two ends, already defaulted.
#[derive(Debug, Clone, Copy)]
pub(super) struct Endpoints<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

/// Build `[WALK?, TRANSIT, WALK?]` from one legacy line.
pub(super) fn lift_line(
    line: &LegacyLine,
    ends: Endpoints<'_>,
    config: &NormalizeConfig,
) -> Result<Itinerary, DomainError> {
    let first_stop = line
        .stops
        .first()
        .map(|s| s.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_START);
    let last_stop = line
        .stops
        .last()
        .map(|s| s.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_END);

    let mut steps = Vec::with_capacity(3);

    if let Some(encoded) = line.walk_to_start() {
        let walk = estimate(encoded, config);
        steps.push(ItineraryStep::Walk(WalkStep {
            duration_seconds: walk.duration_seconds,
            distance_meters: walk.distance_meters,
            polyline: walk.polyline,
            start_time: line.start_stop_arrival_time.clone(),
            end_time: line.start_stop_arrival_time.clone(),
            start_stop_name: ends.origin.to_string(),
            end_stop_name: first_stop.to_string(),
        }));
    }

    steps.push(ItineraryStep::Transit(TransitStep {
        duration_seconds: line.ride_eta_min * 60.0,
        polyline: String::new(),
        start_time: line.start_stop_arrival_time.clone(),
        end_time: line.arrival_time.clone(),
        start_stop_name: first_stop.to_string(),
        end_stop_name: last_stop.to_string(),
        line_id: line.line_id,
        line_name: line.route_name.clone(),
        num_stops: line.stops.len() as u32,
    }));

    if let Some(encoded) = line.walk_to_dest() {
        let walk = estimate(encoded, config);
        steps.push(ItineraryStep::Walk(WalkStep {
            duration_seconds: walk.duration_seconds,
            distance_meters: walk.distance_meters,
            polyline: walk.polyline,
            start_time: line.arrival_time.clone(),
            end_time: line.arrival_time.clone(),
            start_stop_name: last_stop.to_string(),
            end_stop_name: ends.destination.to_string(),
        }));
    }

    Itinerary::from_steps(steps)
}
