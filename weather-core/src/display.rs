//! Display values derived from fetched data.
//!
//! Everything here is a pure function of a fetched response plus the selected
//! [`TemperatureUnit`]; switching units never requires new data.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::model::{CurrentWeather, ForecastSlot};

/// Number of day tiles shown for a forecast.
pub const FORECAST_DAYS: usize = 5;

const UV_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        })
    }
}

/// Rounds half toward positive infinity, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// One temperature pre-rounded in both units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualTemperature {
    pub celsius: i64,
    pub fahrenheit: i64,
}

impl DualTemperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius: round_half_up(celsius),
            fahrenheit: round_half_up(celsius_to_fahrenheit(celsius)),
        }
    }

    pub fn in_unit(&self, unit: TemperatureUnit) -> i64 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }
}

/// Current conditions, ready to show in either unit.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub city: String,
    pub country: String,
    pub temperature: DualTemperature,
    pub feels_like: DualTemperature,
    pub description: String,
    pub icon_url: String,
    pub visibility_m: u32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: u32,
    /// `None` until the UV lookup succeeds.
    pub uv: Option<u8>,
}

impl WeatherPanel {
    pub fn from_current(current: &CurrentWeather) -> Self {
        let record = &current.record;
        let (description, icon_url) = record
            .weather
            .first()
            .map(|c| (c.description.clone(), c.icon_url()))
            .unwrap_or_default();

        Self {
            city: record.name.clone(),
            country: record.sys.country.clone(),
            temperature: DualTemperature::from_celsius(record.main.temp),
            feels_like: DualTemperature::from_celsius(record.main.feels_like),
            description,
            icon_url,
            visibility_m: record.visibility,
            humidity: record.main.humidity,
            wind_speed: record.wind.speed,
            pressure: record.main.pressure,
            uv: None,
        }
    }

    pub fn render(&self, unit: TemperatureUnit) -> RenderedPanel {
        RenderedPanel {
            title: format!("{}, {}", self.city, self.country),
            temperature: format!("{}°", self.temperature.in_unit(unit)),
            feels_like: format!("{}°{}", self.feels_like.in_unit(unit), unit.symbol()),
            description: self.description.clone(),
            icon_url: self.icon_url.clone(),
            visibility: format!("{:.1} km", f64::from(self.visibility_m) / 1000.0),
            humidity: format!("{}%", self.humidity),
            wind: format!("{} m/s", self.wind_speed),
            pressure: format!("{} hPa", self.pressure),
            uv: self
                .uv
                .map_or_else(|| UV_PLACEHOLDER.to_string(), |v| v.to_string()),
        }
    }
}

/// Text for every field of the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPanel {
    pub title: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub icon_url: String,
    pub visibility: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub uv: String,
}

/// One calendar day of the compacted forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon_url: String,
}

impl DayForecast {
    pub fn weekday(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// "21° / 16°"
    pub fn temp_range(&self) -> String {
        format!(
            "{}° / {}°",
            round_half_up(self.temp_max),
            round_half_up(self.temp_min)
        )
    }
}

/// Long-form date line, e.g. "Wednesday, July 24, 2024".
pub fn date_header(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Groups slots by their calendar date in `tz`, keeping the first slot's
/// condition and widening the range across the day. At most
/// [`FORECAST_DAYS`] days, in the order first seen.
pub fn compact_forecast<Tz: TimeZone>(slots: &[ForecastSlot], tz: &Tz) -> Vec<DayForecast> {
    let mut days: Vec<DayForecast> = Vec::new();

    for slot in slots {
        let Some(utc) = DateTime::from_timestamp(slot.dt, 0) else {
            continue;
        };
        let date = utc.with_timezone(tz).date_naive();

        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => {
                day.temp_min = day.temp_min.min(slot.main.temp_min);
                day.temp_max = day.temp_max.max(slot.main.temp_max);
            }
            None => {
                let (description, icon_url) = slot
                    .weather
                    .first()
                    .map(|c| (c.description.clone(), c.icon_url_small()))
                    .unwrap_or_default();
                days.push(DayForecast {
                    date,
                    temp_min: slot.main.temp_min,
                    temp_max: slot.main.temp_max,
                    description,
                    icon_url,
                });
            }
        }
    }

    days.truncate(FORECAST_DAYS);
    days
}
