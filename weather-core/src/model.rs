use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const ICON_HOST: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Coarse category, e.g. "Clouds".
    pub main: String,
    pub description: String,
    /// Token for the external icon host, passed through unchanged.
    pub icon: String,
}

impl Condition {
    /// Large icon used by the current-conditions panel.
    pub fn icon_url(&self) -> String {
        format!("{ICON_HOST}/{}@2x.png", self.icon)
    }

    /// Small icon used by forecast day tiles.
    pub fn icon_url_small(&self) -> String {
        format!("{ICON_HOST}/{}.png", self.icon)
    }
}

/// Temperatures in Celsius, pressure in hPa, humidity in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Metres per second.
    pub speed: f64,
    pub deg: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Snapshot of conditions for one known city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub name: String,
    pub country: String,
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: Measurements,
    /// Metres.
    pub visibility: u32,
    pub wind: Wind,
    pub sys: Sys,
}

/// Body of the current-weather endpoints: the record plus the time it was served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(flatten)]
    pub record: WeatherRecord,
    pub dt: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotWind {
    pub speed: f64,
}

/// One synthesized 3-hour forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    pub dt: i64,
    pub main: SlotMain,
    pub weather: Vec<Condition>,
    pub wind: SlotWind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub country: String,
    pub coord: Coord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: ForecastCity,
    pub list: Vec<ForecastSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvIndex {
    pub lat: f64,
    pub lon: f64,
    pub value: u8,
}

/// Capability listing served at the API root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIndex {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
    pub available_cities: Vec<String>,
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-oriented tag, e.g. `not_found`.
    pub error: String,
    pub message: String,
}
