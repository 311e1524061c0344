//! Integration tests for the HTTP API
#![allow(clippy::expect_used)]

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use weather_core::{CurrentWeather, ErrorBody, Forecast, UvIndex, catalog::CITIES};
use weather_server::{create_router, routes::with_middleware};

fn create_test_server() -> TestServer {
    TestServer::new(create_router()).expect("Failed to create test server")
}

// ============ Current weather by city ============

#[tokio::test]
async fn every_known_city_resolves_case_insensitively() {
    let server = create_test_server();

    for city in &CITIES {
        for query in [city.key.to_string(), city.key.to_uppercase(), city.name.to_string()] {
            let response = server.get("/api/weather").add_query_param("q", &query).await;

            response.assert_status_ok();
            let body: CurrentWeather = response.json();
            assert_eq!(body.record.name, city.name, "query {query:?}");
            assert!(body.dt > 0);
        }
    }
}

#[tokio::test]
async fn weather_body_has_wire_shape() {
    let server = create_test_server();

    let response = server
        .get("/api/weather")
        .add_query_param("q", "london")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "London");
    assert_eq!(body["sys"]["country"], "GB");
    assert_eq!(body["main"]["temp"], 18.5);
    assert_eq!(body["weather"][0]["icon"], "04d");
    assert_eq!(body["coord"]["lat"], 51.5074);
    assert!(body["dt"].is_i64());
}

#[tokio::test]
async fn unknown_city_lists_alternatives() {
    let server = create_test_server();

    let response = server
        .get("/api/weather")
        .add_query_param("q", "Nowhereville")
        .await;

    response.assert_status_not_found();
    let body: ErrorBody = response.json();
    assert_eq!(body.error, "not_found");
    for name in ["London", "New York", "Tokyo", "Paris", "Mumbai", "Sydney"] {
        assert!(body.message.contains(name), "missing {name}: {}", body.message);
    }
    assert!(body.message.contains("\"Nowhereville\""));
}

#[tokio::test]
async fn missing_city_is_bad_request() {
    let server = create_test_server();

    for url in ["/api/weather", "/api/weather?q="] {
        let response = server.get(url).await;

        response.assert_status_bad_request();
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "missing_parameter");
    }
}

#[tokio::test]
async fn repeated_query_key_gets_json_error() {
    let server = create_test_server();

    let response = server.get("/api/weather?q=london&q=paris").await;

    response.assert_status_bad_request();
    let body: ErrorBody = response.json();
    assert_eq!(body.error, "bad_request");
    assert!(body.message.contains("duplicate field"), "{}", body.message);
}

// ============ Current weather by coordinates ============

#[tokio::test]
async fn coordinates_route_to_region_and_echo_input() {
    let server = create_test_server();

    let response = server
        .get("/api/weather/coordinates")
        .add_query_param("lat", "40.7")
        .add_query_param("lon", "-74.0")
        .await;

    response.assert_status_ok();
    let body: CurrentWeather = response.json();
    assert_eq!(body.record.name, "New York");
    assert_eq!(body.record.coord.lat, 40.7);
    assert_eq!(body.record.coord.lon, -74.0);
}

#[tokio::test]
async fn unmatched_coordinates_default_to_london() {
    let server = create_test_server();

    let response = server.get("/api/weather/coordinates?lat=0&lon=0").await;

    response.assert_status_ok();
    let body: CurrentWeather = response.json();
    assert_eq!(body.record.name, "London");
    assert_eq!(body.record.coord.lat, 0.0);
    assert_eq!(body.record.coord.lon, 0.0);
}

#[tokio::test]
async fn malformed_coordinates_fall_through_to_london() {
    let server = create_test_server();

    let response = server
        .get("/api/weather/coordinates?lat=abc&lon=-74.0")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "London");
    assert!(body["coord"]["lat"].is_null());
    assert_eq!(body["coord"]["lon"], -74.0);
}

#[tokio::test]
async fn partially_numeric_coordinates_are_not_prefix_parsed() {
    let server = create_test_server();

    let response = server
        .get("/api/weather/coordinates?lat=40.7abc&lon=-74.0")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "London");
    assert!(body["coord"]["lat"].is_null());
}

#[tokio::test]
async fn coordinates_require_both_parameters() {
    let server = create_test_server();

    for url in [
        "/api/weather/coordinates",
        "/api/weather/coordinates?lat=40.7",
        "/api/weather/coordinates?lon=-74.0",
    ] {
        let response = server.get(url).await;

        response.assert_status_bad_request();
        let body: ErrorBody = response.json();
        assert_eq!(body.message, "Please provide lat and lon parameters");
    }
}

// ============ Forecast ============

#[tokio::test]
async fn forecast_has_forty_three_hourly_slots() {
    let server = create_test_server();

    let response = server.get("/api/forecast?q=Tokyo").await;

    response.assert_status_ok();
    let body: Forecast = response.json();
    assert_eq!(body.city.name, "Tokyo");
    assert_eq!(body.city.country, "JP");
    assert_eq!(body.list.len(), 40);
    for pair in body.list.windows(2) {
        assert_eq!(pair[1].dt - pair[0].dt, 10_800);
    }
    for slot in &body.list {
        assert!(slot.main.temp_max >= slot.main.temp_min);
        assert!((25.6..31.8).contains(&slot.main.temp));
    }
}

#[tokio::test]
async fn forecast_by_coordinates_uses_london() {
    let server = create_test_server();

    let response = server.get("/api/forecast?lat=35.6&lon=139.7").await;

    response.assert_status_ok();
    let body: Forecast = response.json();
    assert_eq!(body.city.name, "London");
    assert_eq!(body.city.coord.lat, 51.5074);
}

#[tokio::test]
async fn forecast_without_location_is_not_found() {
    let server = create_test_server();

    for url in ["/api/forecast", "/api/forecast?lat=1", "/api/forecast?q=Atlantis"] {
        let response = server.get(url).await;

        response.assert_status_not_found();
        let body: ErrorBody = response.json();
        assert_eq!(body.message, "Unable to generate forecast for this location");
    }
}

// ============ UV index ============

#[tokio::test]
async fn uv_index_echoes_coordinates() {
    let server = create_test_server();

    let response = server.get("/api/uvi?lat=48.85&lon=2.35").await;

    response.assert_status_ok();
    let body: UvIndex = response.json();
    assert_eq!(body.lat, 48.85);
    assert_eq!(body.lon, 2.35);
    assert!((1..=10).contains(&body.value));
}

#[tokio::test]
async fn uv_index_requires_coordinates() {
    let server = create_test_server();

    let response = server.get("/api/uvi?lat=48.85").await;

    response.assert_status_bad_request();
}

// ============ Index and fallback ============

#[tokio::test]
async fn index_lists_endpoints_and_cities() {
    let server = create_test_server();

    let response = server.get("/api").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Simple Weather API");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["endpoints"]["GET /api/weather?q={city}"].is_string());
    assert_eq!(
        body["availableCities"],
        serde_json::json!(["london", "new york", "tokyo", "paris", "mumbai", "sydney"])
    );
}

#[tokio::test]
async fn unknown_api_path_points_at_documentation() {
    let server = create_test_server();

    let response = server.get("/api/does-not-exist").await;

    response.assert_status_not_found();
    let body: ErrorBody = response.json();
    assert_eq!(body.error, "not_found");
    assert_eq!(body.message, "Please check the API documentation at /api");
}

#[tokio::test]
async fn wrong_method_on_known_path_is_json_not_found() {
    let server = create_test_server();

    for response in [
        server.post("/api/weather").await,
        server.delete("/api/uvi").await,
    ] {
        response.assert_status_not_found();
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Please check the API documentation at /api");
    }
}

// ============ Internal errors ============

async fn exploding_handler() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn handler_panic_becomes_generic_json_500() {
    let router = with_middleware(Router::new().route("/api/boom", get(exploding_handler)));
    let server = TestServer::new(router).expect("Failed to create test server");

    let response = server.get("/api/boom").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "error": "internal_error",
            "message": "Something went wrong on the server"
        })
    );
}
