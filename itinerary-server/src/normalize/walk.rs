//! Walk leg estimates from walk geometry.

use tracing::warn;

use crate::geometry::path_length_meters;
use crate::polyline;

use super::NormalizeConfig;

/// A walk leg's geometry with its estimated length and duration.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct WalkEstimate {
    /// The input polyline, or empty if it could not be decoded.
    pub polyline: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Measure an encoded walk path.
///
/// Falls back to the configured constants when the path has no length.
pub(super) fn estimate(encoded: &str, config: &NormalizeConfig) -> WalkEstimate {
    let (polyline, path) = match polyline::decode(encoded) {
        Ok(path) => (encoded.to_string(), path),
        Err(e) => {
            warn!(error = %e, "undecodable walk polyline; dropping geometry");
            (String::new(), Vec::new())
        }
    };

    let distance = path_length_meters(&path);
    if distance > 0.0 && config.walking_speed_mps > 0.0 {
        WalkEstimate {
            polyline,
            distance_meters: distance,
            duration_seconds: distance / config.walking_speed_mps,
        }
    } else {
        WalkEstimate {
            polyline,
            distance_meters: config.fallback_walk_meters,
            duration_seconds: config.fallback_walk_seconds,
        }
    }
}
