use serde::{Deserialize, Serialize};

use crate::domain::common::non_blank;

/// Geocoded address as returned by the Mapbox search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapboxAddress {
    pub id: String,
    pub place_name: String,
    /// `[longitude, latitude]`, in that order.
    pub center: [f64; 2],
    pub address: String,
    pub city: String,
    pub postcode: String,
}

impl MapboxAddress {
    pub fn longitude(&self) -> f64 {
        self.center[0]
    }

    pub fn latitude(&self) -> f64 {
        self.center[1]
    }
}

/// Turns free-text input into candidate addresses.
pub trait Geocoder {
    fn search(&self, query: &str) -> Vec<MapboxAddress>;
}

/// Offline geocoder that echoes the query back as a single candidate.
///
/// Expects `street, postcode city`; anything after the last comma is split on
/// the first space into postcode and city.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualGeocoder;

impl Geocoder for ManualGeocoder {
    fn search(&self, query: &str) -> Vec<MapboxAddress> {
        let Some(query) = non_blank(query) else {
            return Vec::new();
        };
        let (street, locality) = match query.rsplit_once(',') {
            Some((street, locality)) => (street.trim(), locality.trim()),
            None => (query, ""),
        };
        let (postcode, city) = match locality.split_once(' ') {
            Some((postcode, city)) if postcode.chars().all(|c| c.is_ascii_digit()) => {
                (postcode, city.trim())
            }
            _ => ("", locality),
        };
        vec![MapboxAddress {
            id: format!("manual.{}", query.len()),
            place_name: query.to_string(),
            center: [0.0, 0.0],
            address: street.to_string(),
            city: city.to_string(),
            postcode: postcode.to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_geocoder_splits_postcode_and_city() {
        let candidates = ManualGeocoder.search("12 rue des Lilas, 69003 Lyon");
        assert_eq!(candidates.len(), 1);
        let address = &candidates[0];
        assert_eq!(address.address, "12 rue des Lilas");
        assert_eq!(address.postcode, "69003");
        assert_eq!(address.city, "Lyon");
    }

    #[test]
    fn blank_query_yields_no_candidates() {
        assert!(ManualGeocoder.search("   ").is_empty());
    }

    #[test]
    fn center_is_longitude_then_latitude() {
        let address = MapboxAddress {
            id: "a".into(),
            place_name: "Paris".into(),
            center: [2.35, 48.85],
            address: String::new(),
            city: "Paris".into(),
            postcode: "75001".into(),
        };
        assert_eq!(address.longitude(), 2.35);
        assert_eq!(address.latitude(), 48.85);
    }
}
