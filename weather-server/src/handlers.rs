//! Handlers for the `/api` endpoints.
//!
//! Every handler is a pure function of its query string, the static catalog,
//! the clock and the thread RNG.

use std::collections::BTreeMap;

use axum::{Json, extract::Query, http::Uri};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, instrument};
use weather_core::{
    Coord, CurrentWeather, Forecast, UvIndex,
    catalog::{self, DEFAULT_CITY},
    model::{ApiIndex, ForecastCity},
    synth,
};

use crate::error::ApiError;

const SERVICE_NAME: &str = "Simple Weather API";
const SERVICE_DESCRIPTION: &str = "A basic weather API for demonstration purposes";

/// Query extractor whose failures are answered with a JSON [`ApiError`].
pub type LocationQuery = WithRejection<Query<LocationParams>, ApiError>;

/// Raw query string; empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl LocationParams {
    fn city(&self) -> Option<&str> {
        present(&self.q)
    }

    /// Both coordinates, parsed leniently: anything that is not a number becomes NaN.
    fn coordinates(&self) -> Option<Coord> {
        let lat = present(&self.lat)?;
        let lon = present(&self.lon)?;
        Some(Coord::new(parse_degrees(lat), parse_degrees(lon)))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_degrees(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

fn missing_coordinates() -> ApiError {
    ApiError::MissingParameter("Please provide lat and lon parameters".to_string())
}

fn now() -> i64 {
    Utc::now().timestamp()
}

/// GET /api/weather?q={city}
#[instrument(skip_all)]
pub async fn weather_by_city(
    WithRejection(Query(params), _): LocationQuery,
) -> Result<Json<CurrentWeather>, ApiError> {
    let city = params.city().ok_or_else(|| {
        ApiError::MissingParameter("Please provide a city name using the ?q= parameter".to_string())
    })?;

    let found = catalog::find_city(city).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Weather data for \"{city}\" is not available. Try: {}",
            catalog::city_names_sentence()
        ))
    })?;

    debug!(city = found.name, "serving current weather");
    Ok(Json(CurrentWeather {
        record: found.record(),
        dt: now(),
    }))
}

/// GET /api/weather/coordinates?lat={lat}&lon={lon}
///
/// Answers with the region's city but echoes the requested coordinates.
#[instrument(skip_all)]
pub async fn weather_by_coordinates(
    WithRejection(Query(params), _): LocationQuery,
) -> Result<Json<CurrentWeather>, ApiError> {
    let coord = params.coordinates().ok_or_else(missing_coordinates)?;
    let city = catalog::city_for_coordinates(coord.lat, coord.lon);

    debug!(city = city.name, "routed coordinates");
    let mut record = city.record();
    record.coord = coord;

    Ok(Json(CurrentWeather { record, dt: now() }))
}

/// GET /api/forecast?q={city} or ?lat={lat}&lon={lon}
///
/// Coordinates are not routed: any coordinate request gets London's forecast.
#[instrument(skip_all)]
pub async fn forecast(
    WithRejection(Query(params), _): LocationQuery,
) -> Result<Json<Forecast>, ApiError> {
    let base = match params.city() {
        Some(city) => catalog::find_city(city),
        None => params.coordinates().map(|_| &DEFAULT_CITY),
    }
    .ok_or_else(|| {
        ApiError::NotFound("Unable to generate forecast for this location".to_string())
    })?;

    let list = synth::forecast(base.main.temp, now(), &mut rand::rng());
    debug!(city = base.name, slots = list.len(), "synthesized forecast");

    Ok(Json(Forecast {
        city: ForecastCity {
            name: base.name.to_string(),
            country: base.country.to_string(),
            coord: base.coord,
        },
        list,
    }))
}

/// GET /api/uvi?lat={lat}&lon={lon}
#[instrument(skip_all)]
pub async fn uv_index(
    WithRejection(Query(params), _): LocationQuery,
) -> Result<Json<UvIndex>, ApiError> {
    let coord = params.coordinates().ok_or_else(missing_coordinates)?;
    let value = synth::uv_index(&mut rand::rng());

    Ok(Json(UvIndex {
        lat: coord.lat,
        lon: coord.lon,
        value,
    }))
}

/// GET /api
pub async fn index() -> Json<ApiIndex> {
    let endpoints = [
        ("GET /api/weather?q={city}", "Get current weather by city name"),
        (
            "GET /api/weather/coordinates?lat={lat}&lon={lon}",
            "Get current weather by coordinates",
        ),
        ("GET /api/forecast?q={city}", "Get 5-day forecast by city name"),
        ("GET /api/uvi?lat={lat}&lon={lon}", "Get UV index by coordinates"),
    ]
    .into_iter()
    .map(|(route, about)| (route.to_string(), about.to_string()))
    .collect::<BTreeMap<_, _>>();

    Json(ApiIndex {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        endpoints,
        available_cities: catalog::city_keys(),
    })
}

/// Any route that does not exist.
pub async fn not_found(uri: Uri) -> ApiError {
    debug!(%uri, "no such endpoint");
    ApiError::NotFound("Please check the API documentation at /api".to_string())
}

#[cfg(test)]
mod tests {
    use std::marker::PhantomData;

    use super::*;

    fn query(params: LocationParams) -> LocationQuery {
        WithRejection(Query(params), PhantomData)
    }

    fn params(q: Option<&str>, lat: Option<&str>, lon: Option<&str>) -> LocationParams {
        LocationParams {
            q: q.map(String::from),
            lat: lat.map(String::from),
            lon: lon.map(String::from),
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        assert_eq!(params(Some(""), None, None).city(), None);
        assert!(params(None, Some(""), Some("2")).coordinates().is_none());
        assert!(params(None, Some("1"), None).coordinates().is_none());
    }

    #[test]
    fn malformed_coordinates_become_nan() {
        let coord = params(None, Some("north"), Some("-74.0"))
            .coordinates()
            .expect("both present");
        assert!(coord.lat.is_nan());
        assert_eq!(coord.lon, -74.0);
    }

    #[test]
    fn trailing_garbage_is_not_a_number() {
        let coord = params(None, Some("40.7abc"), Some("-74.0"))
            .coordinates()
            .expect("both present");
        assert!(coord.lat.is_nan());
        assert_eq!(parse_degrees(" 40.7 "), 40.7);
    }

    #[tokio::test]
    async fn coordinates_echo_request_not_city() {
        let Json(body) = weather_by_coordinates(query(params(None, Some("40.7"), Some("-74.0"))))
            .await
            .expect("valid request");

        assert_eq!(body.record.name, "New York");
        assert_eq!(body.record.coord, Coord::new(40.7, -74.0));
    }

    #[tokio::test]
    async fn forecast_by_coordinates_is_always_london() {
        let Json(body) = forecast(query(params(None, Some("35.6"), Some("139.7"))))
            .await
            .expect("valid request");

        assert_eq!(body.city.name, "London");
        assert_eq!(body.list.len(), synth::FORECAST_SLOTS);
    }

    #[tokio::test]
    async fn forecast_without_location_is_not_found() {
        let err = forecast(query(LocationParams::default())).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
