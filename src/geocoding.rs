//! Address to coordinate lookup.
//!
//! Handlers only see the [`Geocoder`] trait. [`OpenCageGeocoder`] is the
//! production provider; tests plug in their own implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First candidate for `address`, or `None` when the provider has no match.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, AppError>;
}

pub struct OpenCageGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenCageGeocoder {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl OpenCageResponse {
    fn first_candidate(self) -> Option<Coordinates> {
        self.results.into_iter().next().map(|r| Coordinates {
            latitude: r.geometry.lat,
            longitude: r.geometry.lng,
        })
    }
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, AppError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", address),
                ("key", self.api_key.as_str()),
                ("limit", "1"),
                ("no_annotations", "1"),
            ])
            .send()
            .await
            // the request url carries the api key
            .map_err(|e| AppError::Upstream(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!("provider responded with {status}")));
        }

        let body: OpenCageResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(e.without_url().to_string()))?;
        debug!(candidates = body.results.len(), "geocoding response");

        Ok(body.first_candidate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder_for(server: &MockServer) -> OpenCageGeocoder {
        OpenCageGeocoder::new("test-key".into(), format!("{}/geocode/v1/json", server.uri()))
    }

    #[test]
    fn first_candidate_wins() {
        let body: OpenCageResponse = serde_json::from_value(json!({
            "results": [
                { "geometry": { "lat": 40.4168, "lng": -3.7038 }, "confidence": 2 },
                { "geometry": { "lat": 1.0, "lng": 2.0 }, "confidence": 9 }
            ],
            "total_results": 2
        }))
        .unwrap();

        assert_eq!(
            body.first_candidate(),
            Some(Coordinates { latitude: 40.4168, longitude: -3.7038 })
        );
    }

    #[test]
    fn empty_or_absent_results_mean_no_match() {
        let empty: OpenCageResponse = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert_eq!(empty.first_candidate(), None);

        let absent: OpenCageResponse = serde_json::from_value(json!({ "status": {} })).unwrap();
        assert_eq!(absent.first_candidate(), None);
    }

    #[tokio::test]
    async fn sends_address_and_key_to_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Calle Mayor 1, Madrid"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "geometry": { "lat": 40.415, "lng": -3.707 } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let coords = geocoder_for(&server)
            .geocode("Calle Mayor 1, Madrid")
            .await
            .unwrap();

        assert_eq!(coords, Some(Coordinates { latitude: 40.415, longitude: -3.707 }));
    }

    #[tokio::test]
    async fn provider_without_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let coords = geocoder_for(&server).geocode("nowhere at all").await.unwrap();
        assert_eq!(coords, None);
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": { "code": 401, "message": "invalid API key" }
            })))
            .mount(&server)
            .await;

        let err = geocoder_for(&server).geocode("Bay Park").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert!(!err.to_string().contains("test-key"));
    }
}
