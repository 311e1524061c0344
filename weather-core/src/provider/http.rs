use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::model::{Coord, CurrentWeather, ErrorBody, Forecast, UvIndex};

use super::{FetchError, ForecastQuery, WeatherProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to the weather service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    base_url: String,
    http: Client,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network {
                url: base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { base_url, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "sending request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::Network {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|err| err.message);
            debug!(%url, %status, body = %truncate_body(&body), "request rejected");
            return Err(FetchError::Status { status, message });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

fn coordinate_query(coord: Coord) -> [(&'static str, String); 2] {
    [("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())]
}

#[async_trait]
impl WeatherProvider for HttpProvider {
    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, FetchError> {
        self.get_json("/weather", &[("q", city.to_string())]).await
    }

    #[instrument(skip(self))]
    async fn current_by_coordinates(&self, coord: Coord) -> Result<CurrentWeather, FetchError> {
        self.get_json("/weather/coordinates", &coordinate_query(coord))
            .await
    }

    #[instrument(skip(self))]
    async fn forecast(&self, query: &ForecastQuery) -> Result<Forecast, FetchError> {
        match query {
            ForecastQuery::City(city) => {
                self.get_json("/forecast", &[("q", city.clone())]).await
            }
            ForecastQuery::Coordinates(coord) => {
                self.get_json("/forecast", &coordinate_query(*coord)).await
            }
        }
    }

    #[instrument(skip(self))]
    async fn uv_index(&self, coord: Coord) -> Result<UvIndex, FetchError> {
        self.get_json("/uvi", &coordinate_query(coord)).await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
