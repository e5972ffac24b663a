//! Derived durations for timeline and summary rendering.
//!
//! Wall-clock spans wrap at midnight: an end time earlier in the day than
//! the start is read as the next day. That assumption only holds for
//! itineraries shorter than 24 hours.

use serde::Serialize;

use crate::domain::{Itinerary, ItineraryStep, StepMode, TimeError, WallTime};

/// Seconds rounded to the nearest whole minute.
pub fn minutes(seconds: f64) -> i64 {
    (seconds / 60.0).round() as i64
}

/// Minutes from `start_time` to `end_time`, both "HH:MM[:SS]".
///
/// A negative difference is taken to cross midnight and gets 1440 minutes
/// added.
///
/// # Examples
///
/// ```
/// use itinerary_server::metrics::total_duration_minutes;
///
/// assert_eq!(total_duration_minutes("10:00", "10:45").unwrap(), 45);
/// assert_eq!(total_duration_minutes("23:50", "00:10").unwrap(), 20);
/// ```
pub fn total_duration_minutes(start_time: &str, end_time: &str) -> Result<i64, TimeError> {
    let start = WallTime::parse(start_time)?;
    let end = WallTime::parse(end_time)?;
    Ok(start.minutes_until(end))
}

/// Per-step figures shown on a timeline row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepMetrics {
    pub mode: StepMode,
    pub minutes: i64,
    /// Walking distance; `None` for transit legs.
    pub distance_meters: Option<f64>,
    /// Stops ridden; `None` for walks.
    pub num_stops: Option<u32>,
}

impl StepMetrics {
    pub fn compute(step: &ItineraryStep) -> Self {
        match step {
            ItineraryStep::Walk(w) => Self {
                mode: StepMode::Walk,
                minutes: minutes(w.duration_seconds),
                distance_meters: Some(w.distance_meters),
                num_stops: None,
            },
            ItineraryStep::Transit(t) => Self {
                mode: StepMode::Transit,
                minutes: minutes(t.duration_seconds),
                distance_meters: None,
                num_stops: Some(t.num_stops),
            },
        }
    }
}

/// Summary figures for an itinerary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryMetrics {
    /// Total duration from the itinerary's own `duration_seconds`.
    pub total_minutes: i64,
    /// Minutes between start and end clock times; `None` if either is
    /// unparseable.
    pub span_minutes: Option<i64>,
    pub walk_meters: f64,
    pub transit_legs: usize,
    pub transfers: usize,
    pub steps: Vec<StepMetrics>,
}

impl ItineraryMetrics {
    pub fn compute(itinerary: &Itinerary) -> Self {
        let steps: Vec<StepMetrics> = itinerary.steps().iter().map(StepMetrics::compute).collect();
        let transit_legs = steps
            .iter()
            .filter(|s| s.mode == StepMode::Transit)
            .count();

        Self {
            total_minutes: minutes(itinerary.duration_seconds()),
            span_minutes: total_duration_minutes(itinerary.start_time(), itinerary.end_time())
                .ok(),
            walk_meters: steps.iter().filter_map(|s| s.distance_meters).sum(),
            transit_legs,
            transfers: transit_legs.saturating_sub(1),
            steps,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Spans are always within a single day
        #[test]
        fn span_within_day(h1 in 0u32..24, m1 in 0u32..60, h2 in 0u32..24, m2 in 0u32..60) {
            let span = total_duration_minutes(
                &format!("{h1:02}:{m1:02}"),
                &format!("{h2:02}:{m2:02}"),
            ).unwrap();
            prop_assert!((0..1440).contains(&span));
        }

        /// A span matches adding its minutes back onto the start time
        #[test]
        fn span_adds_back(h in 0u32..24, m in 0u32..60, d in 0i64..1440) {
            let start = h as i64 * 60 + m as i64;
            let end = (start + d).rem_euclid(1440);
            let span = total_duration_minutes(
                &format!("{h:02}:{m:02}"),
                &format!("{:02}:{:02}", end / 60, end % 60),
            ).unwrap();
            prop_assert_eq!(span, d);
        }

        /// minutes() is within half a minute of the exact value
        #[test]
        fn minutes_close(secs in 0u32..200_000) {
            let exact = secs as f64 / 60.0;
            prop_assert!((minutes(secs as f64) as f64 - exact).abs() <= 0.5);
        }
    }
}
