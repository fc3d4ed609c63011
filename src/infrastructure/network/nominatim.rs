use crate::domain::error::NearbyError;
use crate::domain::model::Coordinate;
use crate::domain::traits::Geocoder;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

// Nominatim search result (lat/lon are strings)
#[derive(Deserialize, Debug)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    #[allow(dead_code)]
    display_name: Option<String>,
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, query: &str) -> Result<Vec<Coordinate>, NearbyError> {
        let params = [("format", "json"), ("limit", "1"), ("q", query)];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(NearbyError::request_failed)?;

        if !response.status().is_success() {
            return Err(NearbyError::RequestFailed(format!(
                "geocoding service returned {}",
                response.status()
            )));
        }

        let hits = response
            .json::<Vec<SearchHit>>()
            .await
            .map_err(NearbyError::request_failed)?;

        hits.into_iter()
            .take(1)
            .map(|hit| {
                let lat = parse_degrees(&hit.lat);
                let lng = parse_degrees(&hit.lon);
                match (lat, lng) {
                    (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
                    _ => Err(NearbyError::RequestFailed(format!(
                        "malformed coordinates: {}, {}",
                        hit.lat, hit.lon
                    ))),
                }
            })
            .collect()
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}
