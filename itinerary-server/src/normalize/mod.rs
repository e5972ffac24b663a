//! Itinerary normalization.
//!
//! Turns a backend response in either schema into canonical
//! [`Itinerary`] values. Canonical responses pass through untouched; each
//! legacy line becomes one itinerary of the form `[WALK?, TRANSIT, WALK?]`.
//!
//! Normalization never fails. Missing stop names, absent or broken walk
//! geometry and similar gaps degrade to placeholder values instead.

mod legacy;
mod walk;

use tracing::{debug, warn};

use crate::backend::{ItineraryBody, ItineraryResponse};
use crate::domain::Itinerary;

use legacy::{Endpoints, UNKNOWN_END, UNKNOWN_START, lift_line};

/// Configuration for lifting legacy lines.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Walking speed used to turn a walk path's length into a duration.
    pub walking_speed_mps: f64,

    /// Walk duration used when a path cannot be measured.
    pub fallback_walk_seconds: f64,

    /// Walk distance used when a path cannot be measured.
    pub fallback_walk_meters: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            walking_speed_mps: 1.3,
            fallback_walk_seconds: 300.0,
            fallback_walk_meters: 300.0,
        }
    }
}

/// Converts backend responses to canonical itineraries.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize every itinerary in a response, preserving order.
    pub fn normalize(&self, response: &ItineraryResponse) -> Vec<Itinerary> {
        match &response.body {
            ItineraryBody::Canonical(itineraries) => itineraries.clone(),
            ItineraryBody::Legacy { lines, .. } => {
                let ends = Endpoints {
                    origin: response
                        .start
                        .as_ref()
                        .map(|p| p.name.as_str())
                        .filter(|n| !n.is_empty())
                        .unwrap_or(UNKNOWN_START),
                    destination: Some(response.destination.name.as_str())
                        .filter(|n| !n.is_empty())
                        .unwrap_or(UNKNOWN_END),
                };

                let itineraries: Vec<Itinerary> = lines
                    .iter()
                    .filter_map(|line| match lift_line(line, ends, &self.config) {
                        Ok(itinerary) => Some(itinerary),
                        Err(e) => {
                            warn!(line_id = line.line_id, error = %e, "skipping legacy line");
                            None
                        }
                    })
                    .collect();

                debug!(lines = lines.len(), "lifted legacy lines");
                itineraries
            }
        }
    }
}

/// Normalize with the default configuration.
pub fn normalize(response: &ItineraryResponse) -> Vec<Itinerary> {
    Normalizer::default().normalize(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LegacyLine, Place};
    use crate::domain::{ItineraryStep, StepMode, TransitStep};

    fn place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            lat: 33.59,
            lon: -7.68,
        }
    }

    fn bare_line(id: u32) -> LegacyLine {
        LegacyLine {
            line_id: id,
            route_name: format!("L{id}"),
            start_stop_arrival_time: "10:00".into(),
            arrival_time: "10:15".into(),
            ride_eta_min: 15.0,
            stops: Vec::new(),
            walk_to_start_polyline: Some("_r}kEnfqm@oFzE_DjC".into()),
            walk_to_dest_polyline: Some("ss_lEvxzm@cBfE".into()),
        }
    }

    fn legacy_response(start: Option<Place>, destination: Place, n: u32) -> ItineraryResponse {
        ItineraryResponse {
            start,
            destination,
            body: ItineraryBody::Legacy {
                count: n,
                lines: (1..=n).map(bare_line).collect(),
            },
        }
    }

    #[test]
    fn canonical_is_identity() {
        let itin = Itinerary::from_steps(vec![ItineraryStep::Transit(TransitStep {
            duration_seconds: 900.0,
            polyline: "_p~iF~ps|U_ulLnnqC".into(),
            start_time: "23:50".into(),
            end_time: "00:05".into(),
            start_stop_name: "A".into(),
            end_stop_name: "B".into(),
            line_id: 4,
            line_name: "4".into(),
            num_stops: 6,
        })])
        .unwrap();
        let response = ItineraryResponse {
            start: None,
            destination: place("B"),
            body: ItineraryBody::Canonical(vec![itin.clone(), itin.clone()]),
        };

        assert_eq!(normalize(&response), vec![itin.clone(), itin]);
    }

    #[test]
    fn one_itinerary_per_line_in_order() {
        let response = legacy_response(Some(place("Maarif")), place("Ain Diab"), 3);
        let itins = normalize(&response);

        assert_eq!(itins.len(), 3);
        let ids: Vec<u32> = itins
            .iter()
            .map(|i| i.transit_steps().next().unwrap().line_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for itin in &itins {
            assert_eq!(
                itin.modes(),
                vec![StepMode::Walk, StepMode::Transit, StepMode::Walk]
            );
        }
    }

    #[test]
    fn walks_named_after_places() {
        let response = legacy_response(Some(place("Maarif")), place("Ain Diab"), 1);
        let itin = &normalize(&response)[0];

        assert_eq!(itin.steps()[0].start_stop_name(), "Maarif");
        assert_eq!(itin.steps()[0].end_stop_name(), "Unknown Start");
        assert_eq!(itin.steps()[2].start_stop_name(), "Unknown End");
        assert_eq!(itin.steps()[2].end_stop_name(), "Ain Diab");
    }

    #[test]
    fn missing_places_use_fallback_names() {
        let response = legacy_response(None, place(""), 1);
        let itin = &normalize(&response)[0];

        assert_eq!(itin.steps()[0].start_stop_name(), "Unknown Start");
        assert_eq!(itin.steps()[2].end_stop_name(), "Unknown End");
    }

    #[test]
    fn walk_duration_follows_walking_speed() {
        let response = legacy_response(Some(place("Maarif")), place("Ain Diab"), 1);
        let slow = Normalizer::new(NormalizeConfig {
            walking_speed_mps: 0.65,
            ..NormalizeConfig::default()
        });

        let fast_walk = normalize(&response)[0].steps()[0].duration_seconds();
        let slow_walk = slow.normalize(&response)[0].steps()[0].duration_seconds();

        assert!(fast_walk > 0.0);
        assert!((slow_walk - 2.0 * fast_walk).abs() < 1e-6);
    }

    #[test]
    fn empty_legacy_response() {
        let response = legacy_response(None, place("X"), 0);
        assert!(normalize(&response).is_empty());
    }
}
