//! Great-circle distances.

use crate::domain::Coordinate;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Haversine distance between two points in metres.
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Length of a path in metres, summed segment by segment.
///
/// Paths with fewer than two points have zero length.
pub fn path_length_meters(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|pair| haversine_meters(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn same_point_is_zero() {
        let p = c(33.5731, -7.5898);
        assert!(haversine_meters(p, p) < 1e-6);
    }

    #[test]
    fn known_distance() {
        // Casablanca to Rabat is roughly 87 km as the crow flies.
        let dist = haversine_meters(c(33.5731, -7.5898), c(34.0209, -6.8416));
        assert!(dist > 80_000.0 && dist < 95_000.0, "got {dist}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let dist = haversine_meters(c(0.0, 0.0), c(1.0, 0.0));
        assert!((dist - 111_195.0).abs() < 10.0, "got {dist}");
    }

    #[test]
    fn symmetric() {
        let a = c(35.5785, -5.3684);
        let b = c(35.5889, -5.3626);
        assert!((haversine_meters(a, b) - haversine_meters(b, a)).abs() < 1e-9);
    }

    #[test]
    fn path_length_sums_segments() {
        let a = c(0.0, 0.0);
        let b = c(0.0, 0.01);
        let d = c(0.01, 0.01);
        let total = path_length_meters(&[a, b, d]);
        let expected = haversine_meters(a, b) + haversine_meters(b, d);
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn short_paths_have_zero_length() {
        assert_eq!(path_length_meters(&[]), 0.0);
        assert_eq!(path_length_meters(&[c(1.0, 1.0)]), 0.0);
    }
}
