//! Core library for the demo weather service and its client.
//!
//! This crate defines:
//! - The wire model shared by server and client
//! - The static city catalog and coordinate routing
//! - Forecast and UV synthesis
//! - The HTTP client, display state and session flow used by `weather-cli`
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod app;
pub mod catalog;
pub mod config;
pub mod display;
pub mod locate;
pub mod model;
pub mod provider;
pub mod synth;

pub use app::{App, Screen, View};
pub use config::Config;
pub use display::{DayForecast, TemperatureUnit, WeatherPanel};
pub use model::{Coord, CurrentWeather, ErrorBody, Forecast, UvIndex, WeatherRecord};
pub use provider::{FetchError, ForecastQuery, HttpProvider, WeatherProvider};
