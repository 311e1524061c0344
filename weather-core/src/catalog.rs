//! Static sample data: the six known cities and the regions that route coordinates to them.

use tracing::debug;

use crate::model::{Condition, Coord, Measurements, Sys, WeatherRecord, Wind};

/// A condition with static strings, usable in `const` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sky {
    pub main: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl Sky {
    pub const fn new(main: &'static str, description: &'static str, icon: &'static str) -> Self {
        Self { main, description, icon }
    }
}

impl From<Sky> for Condition {
    fn from(sky: Sky) -> Self {
        Condition {
            main: sky.main.to_string(),
            description: sky.description.to_string(),
            icon: sky.icon.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Lowercase lookup key.
    pub key: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub coord: Coord,
    pub sky: Sky,
    pub main: Measurements,
    pub visibility: u32,
    pub wind: Wind,
    pub sunrise: i64,
    pub sunset: i64,
}

impl City {
    pub fn record(&self) -> WeatherRecord {
        WeatherRecord {
            name: self.name.to_string(),
            country: self.country.to_string(),
            coord: self.coord,
            weather: vec![self.sky.into()],
            main: self.main,
            visibility: self.visibility,
            wind: self.wind,
            sys: Sys {
                country: self.country.to_string(),
                sunrise: self.sunrise,
                sunset: self.sunset,
            },
        }
    }
}

pub const LONDON: City = City {
    key: "london",
    name: "London",
    country: "GB",
    coord: Coord::new(51.5074, -0.1278),
    sky: Sky::new("Clouds", "overcast clouds", "04d"),
    main: Measurements {
        temp: 18.5,
        feels_like: 17.8,
        temp_min: 16.2,
        temp_max: 20.1,
        pressure: 1013,
        humidity: 72,
    },
    visibility: 10000,
    wind: Wind { speed: 3.2, deg: 240 },
    sunrise: 1721800320,
    sunset: 1721859840,
};

pub const NEW_YORK: City = City {
    key: "new york",
    name: "New York",
    country: "US",
    coord: Coord::new(40.7128, -74.0060),
    sky: Sky::new("Clear", "clear sky", "01d"),
    main: Measurements {
        temp: 24.3,
        feels_like: 26.1,
        temp_min: 21.5,
        temp_max: 27.2,
        pressure: 1018,
        humidity: 58,
    },
    visibility: 16000,
    wind: Wind { speed: 2.8, deg: 180 },
    sunrise: 1721810420,
    sunset: 1721862240,
};

pub const TOKYO: City = City {
    key: "tokyo",
    name: "Tokyo",
    country: "JP",
    coord: Coord::new(35.6762, 139.6503),
    sky: Sky::new("Rain", "light rain", "10d"),
    main: Measurements {
        temp: 28.7,
        feels_like: 32.1,
        temp_min: 26.3,
        temp_max: 31.5,
        pressure: 1008,
        humidity: 78,
    },
    visibility: 8000,
    wind: Wind { speed: 4.1, deg: 90 },
    sunrise: 1721771520,
    sunset: 1721822340,
};

pub const PARIS: City = City {
    key: "paris",
    name: "Paris",
    country: "FR",
    coord: Coord::new(48.8566, 2.3522),
    sky: Sky::new("Sunny", "sunny", "01d"),
    main: Measurements {
        temp: 22.4,
        feels_like: 21.9,
        temp_min: 19.8,
        temp_max: 25.1,
        pressure: 1020,
        humidity: 65,
    },
    visibility: 12000,
    wind: Wind { speed: 2.5, deg: 200 },
    sunrise: 1721797920,
    sunset: 1721853840,
};

pub const MUMBAI: City = City {
    key: "mumbai",
    name: "Mumbai",
    country: "IN",
    coord: Coord::new(19.0760, 72.8777),
    sky: Sky::new("Rain", "moderate rain", "10d"),
    main: Measurements {
        temp: 26.8,
        feels_like: 29.5,
        temp_min: 25.2,
        temp_max: 28.4,
        pressure: 1006,
        humidity: 85,
    },
    visibility: 6000,
    wind: Wind { speed: 5.2, deg: 270 },
    sunrise: 1721777820,
    sunset: 1721825220,
};

pub const SYDNEY: City = City {
    key: "sydney",
    name: "Sydney",
    country: "AU",
    coord: Coord::new(-33.8688, 151.2093),
    sky: Sky::new("Clear", "clear sky", "01d"),
    main: Measurements {
        temp: 16.2,
        feels_like: 14.8,
        temp_min: 13.5,
        temp_max: 19.1,
        pressure: 1025,
        humidity: 68,
    },
    visibility: 15000,
    wind: Wind { speed: 3.8, deg: 150 },
    sunrise: 1721772420,
    sunset: 1721810220,
};

pub static CITIES: [City; 6] = [LONDON, NEW_YORK, TOKYO, PARIS, MUMBAI, SYDNEY];

/// Inclusive lat/lon rectangle mapped to a city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub label: &'static str,
    pub lat: (f64, f64),
    pub lon: (f64, f64),
    pub city: City,
}

impl Region {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        // NaN fails every comparison and so never matches.
        lat >= self.lat.0 && lat <= self.lat.1 && lon >= self.lon.0 && lon <= self.lon.1
    }
}

/// Checked in order; the first hit wins.
pub static REGIONS: [Region; 5] = [
    Region { label: "North America East", lat: (40.0, 45.0), lon: (-75.0, -70.0), city: NEW_YORK },
    Region { label: "Japan", lat: (35.0, 36.0), lon: (139.0, 140.0), city: TOKYO },
    Region { label: "France", lat: (48.0, 49.0), lon: (2.0, 3.0), city: PARIS },
    Region { label: "India", lat: (19.0, 20.0), lon: (72.0, 73.0), city: MUMBAI },
    Region { label: "Australia", lat: (-34.0, -33.0), lon: (151.0, 152.0), city: SYDNEY },
];

pub static DEFAULT_CITY: City = LONDON;

/// Case-insensitive exact match on the city key.
pub fn find_city(query: &str) -> Option<&'static City> {
    let key = query.to_lowercase();
    CITIES.iter().find(|city| city.key == key)
}

/// First region containing the point, if any.
pub fn region_for_coordinates(lat: f64, lon: f64) -> Option<&'static Region> {
    REGIONS.iter().find(|region| region.contains(lat, lon))
}

pub fn city_for_coordinates(lat: f64, lon: f64) -> &'static City {
    match region_for_coordinates(lat, lon) {
        Some(region) => {
            debug!(region = region.label, city = region.city.name, "coordinates matched region");
            &region.city
        }
        None => {
            debug!(lat, lon, "coordinates outside every region");
            &DEFAULT_CITY
        }
    }
}

pub fn city_keys() -> Vec<String> {
    CITIES.iter().map(|city| city.key.to_string()).collect()
}

/// "London, New York, Tokyo, Paris, Mumbai, or Sydney"
pub fn city_names_sentence() -> String {
    match CITIES.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            let head: Vec<&str> = rest.iter().map(|city| city.name).collect();
            format!("{}, or {}", head.join(", "), last.name)
        }
        Some((last, _)) => last.name.to_string(),
        None => String::new(),
    }
}
