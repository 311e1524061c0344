use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::{CustomUserError, InquireError, Select, Text};
use tracing::debug;
use weather_core::{
    App, Config, Coord, HttpProvider, TemperatureUnit, View,
    catalog::CITIES,
    locate::{FixedLocator, Locator, NoLocator},
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI for the demo weather service")]
pub struct Cli {
    /// Temperature unit to display; overrides the configured one.
    #[arg(long, global = true, value_enum)]
    pub unit: Option<UnitArg>,

    /// API root, e.g. "http://localhost:3000/api"; overrides the configured one.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API location and the default unit.
    Configure,

    /// Show weather and forecast for a city.
    Search {
        /// City name, e.g. "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show weather for the current location (London when it cannot be determined).
    Locate(LocateArgs),

    /// Start from the current location, then search and switch units interactively.
    Interactive,
}

#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Latitude reported by the device.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude reported by the device.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl LocateArgs {
    fn locator(&self) -> Box<dyn Locator> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Box::new(FixedLocator(Coord::new(lat, lon))),
            _ => Box::new(NoLocator),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Celsius => TemperatureUnit::Celsius,
            UnitArg::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

const SEARCH: &str = "Search for a city";
const QUICK_SEARCH: &str = "Quick search";
const LOCATE: &str = "Use my location";
const SWITCH_UNIT: &str = "Switch temperature unit";
const QUIT: &str = "Quit";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        if let Command::Configure = self.command {
            return configure(config);
        }

        let base_url = self.base_url.as_deref().unwrap_or(config.base_url());
        let unit = self.unit.map_or(config.unit(), TemperatureUnit::from);
        let provider = HttpProvider::new(base_url)
            .with_context(|| format!("Failed to create HTTP client for {base_url}"))?;
        debug!(base_url, %unit, "starting session");
        let mut app = App::new(provider, unit);

        match self.command {
            Command::Configure => {}
            Command::Search { city } => {
                app.search(&city.join(" ")).await;
                print_view(&app.render());
            }
            Command::Locate(args) => {
                app.locate_with_progress(&*args.locator(), print_progress).await;
                print_view(&app.render());
            }
            Command::Interactive => interactive(&mut app).await?,
        }

        Ok(())
    }
}

fn print_view(view: &View) {
    println!("{}", output::format_view(view, Local::now().date_naive()));
}

fn print_progress(step: &str) {
    println!("{step}");
}

/// Known city names starting with `input`, ignoring case.
fn suggest_cities(input: &str) -> Result<Vec<String>, CustomUserError> {
    let prefix = input.trim().to_lowercase();
    Ok(CITIES
        .iter()
        .filter(|city| city.key.starts_with(&prefix))
        .map(|city| city.name.to_string())
        .collect())
}

async fn interactive(app: &mut App<HttpProvider>) -> anyhow::Result<()> {
    app.locate_with_progress(&NoLocator, print_progress).await;
    print_view(&app.render());

    loop {
        let menu = vec![SEARCH, QUICK_SEARCH, LOCATE, SWITCH_UNIT, QUIT];
        let choice = match Select::new("What next?", menu).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read menu selection"),
        };

        match choice {
            SEARCH => {
                let initial = app.last_city().unwrap_or_default().to_string();
                let city = match Text::new("City:")
                    .with_initial_value(&initial)
                    .with_autocomplete(suggest_cities)
                    .prompt()
                {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e).context("Failed to read city name"),
                };
                print_view(&View::Loading);
                app.search(&city).await;
            }
            QUICK_SEARCH => {
                let names: Vec<&str> = CITIES.iter().map(|city| city.name).collect();
                let city = match Select::new("City:", names).prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e).context("Failed to read city choice"),
                };
                print_view(&View::Loading);
                app.search(city).await;
            }
            LOCATE => app.locate_with_progress(&NoLocator, print_progress).await,
            SWITCH_UNIT => app.toggle_unit(),
            _ => break,
        }

        print_view(&app.render());
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let base_url = Text::new("Weather API base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;
    config.set_base_url(&base_url);

    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units.iter().position(|u| *u == config.unit()).unwrap_or(0);
    let unit = Select::new("Default temperature unit:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read temperature unit")?;
    config.set_unit(unit);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
