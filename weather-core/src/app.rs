//! Client session: the idle → loading → weather | error flow plus the unit toggle.

use chrono::Local;
use tracing::{debug, warn};

use crate::{
    display::{DayForecast, RenderedPanel, TemperatureUnit, WeatherPanel, compact_forecast},
    locate::{LOCATING_MESSAGE, Locator, resolve_location},
    model::{Coord, CurrentWeather},
    provider::{FetchError, ForecastQuery, WeatherProvider},
};

const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
const CITY_FETCH_FAILED: &str = "Unable to fetch weather data";
const LOCATION_FETCH_FAILED: &str = "Unable to fetch weather data for your location";

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherScreen {
    pub panel: WeatherPanel,
    /// Empty until (and unless) the forecast lookup succeeds.
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Idle,
    Loading,
    Weather(WeatherScreen),
    Error(String),
}

/// What the user should currently see, for the selected unit.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Idle,
    Loading,
    Weather {
        panel: RenderedPanel,
        forecast: Vec<DayForecast>,
    },
    Error(String),
}

#[derive(Debug)]
pub struct App<P> {
    provider: P,
    unit: TemperatureUnit,
    screen: Screen,
    last_city: Option<String>,
}

impl<P: WeatherProvider> App<P> {
    pub fn new(provider: P, unit: TemperatureUnit) -> Self {
        Self {
            provider,
            unit,
            screen: Screen::Idle,
            last_city: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Name of the city last shown, for prefilling the search input.
    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Changes the display unit. Never touches the network.
    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
    }

    pub fn render(&self) -> View {
        match &self.screen {
            Screen::Idle => View::Idle,
            Screen::Loading => View::Loading,
            Screen::Weather(screen) => View::Weather {
                panel: screen.panel.render(self.unit),
                forecast: screen.forecast.clone(),
            },
            Screen::Error(message) => View::Error(message.clone()),
        }
    }

    /// Looks up a city by name. Blank input is rejected without a request.
    pub async fn search(&mut self, input: &str) {
        let city = input.trim();
        if city.is_empty() {
            self.set_screen(Screen::Error(EMPTY_CITY_MESSAGE.to_string()));
            return;
        }

        self.set_screen(Screen::Loading);
        let result = self.provider.current_by_city(city).await;
        if let Some(coord) = self.show_current(result, CITY_FETCH_FAILED) {
            self.load_secondary(coord, coord).await;
        }
    }

    /// Uses the device location (or the fallback) to look up the weather.
    pub async fn locate(&mut self, locator: &dyn Locator) {
        self.locate_with_progress(locator, |_| {}).await;
    }

    /// Like [`App::locate`], reporting each step's status text to `progress`.
    pub async fn locate_with_progress<F: FnMut(&str)>(
        &mut self,
        locator: &dyn Locator,
        mut progress: F,
    ) {
        self.set_screen(Screen::Loading);
        progress(LOCATING_MESSAGE);
        let fix = resolve_location(locator).await;
        progress(fix.message());

        let requested = fix.coord();
        let result = self.provider.current_by_coordinates(requested).await;
        if let Some(echoed) = self.show_current(result, LOCATION_FETCH_FAILED) {
            self.load_secondary(requested, echoed).await;
        }
    }

    /// Shows the primary result and returns the coordinates it reported.
    fn show_current(
        &mut self,
        result: Result<CurrentWeather, FetchError>,
        fallback: &str,
    ) -> Option<Coord> {
        match result {
            Ok(current) => {
                self.last_city = Some(current.record.name.clone());
                let coord = current.record.coord;
                self.set_screen(Screen::Weather(WeatherScreen {
                    panel: WeatherPanel::from_current(&current),
                    forecast: Vec::new(),
                }));
                Some(coord)
            }
            Err(err) => {
                warn!(error = %err, "weather lookup failed");
                self.set_screen(Screen::Error(err.user_message(fallback)));
                None
            }
        }
    }

    /// Forecast and UV index. Failures leave the panel as it is.
    async fn load_secondary(&mut self, forecast_at: Coord, uv_at: Coord) {
        let forecast_query = ForecastQuery::Coordinates(forecast_at);
        let (forecast, uv) = tokio::join!(
            self.provider.forecast(&forecast_query),
            self.provider.uv_index(uv_at),
        );

        let Screen::Weather(screen) = &mut self.screen else {
            return;
        };

        match forecast {
            Ok(forecast) => screen.forecast = compact_forecast(&forecast.list, &Local),
            Err(err) => warn!(error = %err, "forecast lookup failed"),
        }

        match uv {
            Ok(uv) => screen.panel.uv = Some(uv.value),
            Err(err) => warn!(error = %err, "UV index lookup failed"),
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        debug!(
            from = screen_name(&self.screen),
            to = screen_name(&screen),
            "screen transition"
        );
        self.screen = screen;
    }
}

fn screen_name(screen: &Screen) -> &'static str {
    match screen {
        Screen::Idle => "idle",
        Screen::Loading => "loading",
        Screen::Weather(_) => "weather",
        Screen::Error(_) => "error",
    }
}
