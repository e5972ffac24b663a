//! Query parameters for the itinerary endpoints.

use crate::domain::Coordinate;

/// Where the trip starts: a free-text address or a resolved position.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Address(String),
    Coordinates(Coordinate),
}

/// Parameters for `GET /itinerary/routes`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyQuery {
    pub destination_address: String,
    pub city_id: u32,
    pub origin: Origin,
}

impl LegacyQuery {
    /// Query string pairs, in the order the backend documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("dest_add", self.destination_address.clone()),
            ("city_id", self.city_id.to_string()),
        ];
        match &self.origin {
            Origin::Address(address) => params.push(("start_add", address.clone())),
            Origin::Coordinates(c) => {
                params.push(("start_lat", c.lat.to_string()));
                params.push(("start_lon", c.lon.to_string()));
            }
        }
        params
    }
}

/// Parameters for `GET /itinerary/v2/routes`.
///
/// The canonical endpoint takes no city and only accepts a coordinate origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalQuery {
    pub destination_address: String,
    pub origin: Coordinate,
}

impl CanonicalQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("dest_add", self.destination_address.clone()),
            ("start_lat", self.origin.lat.to_string()),
            ("start_lon", self.origin.lon.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_params_with_address() {
        let q = LegacyQuery {
            destination_address: "Ain Diab".into(),
            city_id: 1,
            origin: Origin::Address("Maarif".into()),
        };
        assert_eq!(
            q.params(),
            vec![
                ("dest_add", "Ain Diab".to_string()),
                ("city_id", "1".to_string()),
                ("start_add", "Maarif".to_string()),
            ]
        );
    }

    #[test]
    fn legacy_params_with_coordinates() {
        let q = LegacyQuery {
            destination_address: "Ain Diab".into(),
            city_id: 2,
            origin: Origin::Coordinates(Coordinate {
                lat: 33.5731,
                lon: -7.5898,
            }),
        };
        let params = q.params();
        assert_eq!(params.len(), 4);
        assert_eq!(params[2], ("start_lat", "33.5731".to_string()));
        assert_eq!(params[3], ("start_lon", "-7.5898".to_string()));
        assert!(params.iter().all(|(k, _)| *k != "start_add"));
    }

    #[test]
    fn canonical_params_have_no_city() {
        let q = CanonicalQuery {
            destination_address: "Ain Diab".into(),
            origin: Coordinate {
                lat: 33.5731,
                lon: -7.5898,
            },
        };
        let params = q.params();
        assert!(params.iter().all(|(k, _)| *k != "city_id"));
        assert_eq!(params[0], ("dest_add", "Ain Diab".to_string()));
    }
}
