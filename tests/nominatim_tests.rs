//! 地理编码服务测试 (wiremock)

use nearby::application::location::{LocationService, GEO_CACHE_KEY};
use nearby::domain::error::NearbyError;
use nearby::domain::model::Coordinate;
use nearby::domain::traits::{Geocoder, KeyValueStore};
use nearby::infrastructure::network::NominatimGeocoder;
use nearby::infrastructure::storage::MemoryStore;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> NominatimGeocoder {
    NominatimGeocoder::new(reqwest::Client::new(), format!("{}/search", server.uri()))
}

#[tokio::test]
async fn test_lookup_parses_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(query_param("q", "Eiffel Tower"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lat": "48.8583701", "lon": "2.2944813", "display_name": "Tour Eiffel" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let hits = geocoder(&server).lookup("Eiffel Tower").await.unwrap();
    assert_eq!(hits, vec![Coordinate::new(48.8583701, 2.2944813)]);
}

#[tokio::test]
async fn test_lookup_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let hits = geocoder(&server).lookup("nowhere").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_lookup_server_error_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = geocoder(&server).lookup("Paris").await.unwrap_err();
    assert!(matches!(err, NearbyError::RequestFailed(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_lookup_malformed_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "lat": "north", "lon": "2.0" }])),
        )
        .mount(&server)
        .await;

    let err = geocoder(&server).lookup("Paris").await.unwrap_err();
    assert!(matches!(err, NearbyError::RequestFailed(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_geocode_place_hits_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lat": "52.5170365", "lon": "13.3888599" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service =
        LocationService::load(Arc::new(geocoder(&server)), Arc::new(MemoryStore::new())).await;

    let first = service.geocode_place("Berlin").await.unwrap();
    let second = service.geocode_place("  berlin").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Coordinate::new(52.5170365, 13.3888599));
}

#[tokio::test]
async fn test_geocode_place_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service =
        LocationService::load(Arc::new(geocoder(&server)), Arc::new(MemoryStore::new())).await;

    let err = service.geocode_place("Atlantis").await.unwrap_err();
    assert!(matches!(err, NearbyError::NoResults(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_lookup_rejects_non_finite_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "lat": "inf", "lon": "2.0" }])),
        )
        .mount(&server)
        .await;

    let err = geocoder(&server).lookup("Paris").await.unwrap_err();
    assert!(matches!(err, NearbyError::RequestFailed(_)), "got {:?}", err);

    for (lat, lon) in [("NaN", "2.0"), ("48.8", "-infinity")] {
        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "lat": lat, "lon": lon }])),
            )
            .mount(&server)
            .await;
        assert!(geocoder(&server).lookup("Paris").await.is_err());
    }
}

#[tokio::test]
async fn test_non_finite_result_leaves_cache_intact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "lat": "inf", "lon": "2.0" }])),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    assert!(store.is_empty());

    let service = LocationService::load(Arc::new(geocoder(&server)), store.clone()).await;
    service
        .remember_coords("berlin", Coordinate::new(52.52, 13.405))
        .await;
    assert!(service.geocode_place("Paris").await.is_err());
    assert_eq!(service.get_cached_coords("paris"), None);
    drop(service);

    assert_eq!(store.len(), 1);
    assert!(store.get(GEO_CACHE_KEY).await.unwrap().is_some());

    let reloaded = LocationService::load(Arc::new(geocoder(&server)), store).await;
    assert_eq!(reloaded.cached_places(), 1);
    assert_eq!(
        reloaded.get_cached_coords("berlin"),
        Some(Coordinate::new(52.52, 13.405))
    );
}
