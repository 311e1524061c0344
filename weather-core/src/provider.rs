use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::model::{Coord, CurrentWeather, Forecast, UvIndex};

pub mod http;

pub use http::HttpProvider;

/// Default target of the client: the local demo service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("server responded with {status}")]
    Status {
        status: StatusCode,
        /// `message` from the server's error body, when it sent one.
        message: Option<String>,
    },

    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl FetchError {
    /// Server-supplied message if there is one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FetchError::Status { message: Some(message), .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// How a forecast is located.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastQuery {
    City(String),
    Coordinates(Coord),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, FetchError>;

    async fn current_by_coordinates(&self, coord: Coord) -> Result<CurrentWeather, FetchError>;

    async fn forecast(&self, query: &ForecastQuery) -> Result<Forecast, FetchError>;

    async fn uv_index(&self, coord: Coord) -> Result<UvIndex, FetchError>;
}
