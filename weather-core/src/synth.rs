//! Randomised forecast and UV values.

use rand::Rng;

use crate::{
    catalog::Sky,
    model::{ForecastSlot, SlotMain, SlotWind},
};

/// 5 days of 3-hour intervals.
pub const FORECAST_SLOTS: usize = 40;
pub const SLOT_SECONDS: i64 = 3 * 60 * 60;

pub const PALETTE: [Sky; 5] = [
    Sky::new("Clear", "clear sky", "01d"),
    Sky::new("Clouds", "few clouds", "02d"),
    Sky::new("Clouds", "scattered clouds", "03d"),
    Sky::new("Rain", "light rain", "10d"),
    Sky::new("Sunny", "sunny", "01d"),
];

pub fn forecast<R: Rng>(base_temp: f64, now: i64, rng: &mut R) -> Vec<ForecastSlot> {
    (0..FORECAST_SLOTS as i64)
        .map(|i| {
            let temp = base_temp + rng.random_range(-3.0_f64..3.0);
            let sky = PALETTE[rng.random_range(0..PALETTE.len())];

            ForecastSlot {
                dt: now + i * SLOT_SECONDS,
                main: SlotMain {
                    temp,
                    temp_min: temp - 2.0,
                    temp_max: temp + 2.0,
                    humidity: 60 + rng.random_range(0..30u8),
                },
                weather: vec![sky.into()],
                wind: SlotWind {
                    speed: 1.0 + rng.random_range(0.0_f64..5.0),
                },
            }
        })
        .collect()
}

/// Integer in `1..=10`.
pub fn uv_index<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(1..=10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn forecast_has_forty_evenly_spaced_slots() {
        let mut rng = StdRng::seed_from_u64(7);
        let slots = forecast(28.7, 1_700_000_000, &mut rng);

        assert_eq!(slots.len(), FORECAST_SLOTS);
        assert_eq!(slots[0].dt, 1_700_000_000);
        for pair in slots.windows(2) {
            assert_eq!(pair[1].dt - pair[0].dt, SLOT_SECONDS);
        }
    }

    #[test]
    fn forecast_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for slot in forecast(18.5, 0, &mut rng) {
            assert!((15.5..21.5).contains(&slot.main.temp));
            assert!((slot.main.temp_min - (slot.main.temp - 2.0)).abs() < 1e-9);
            assert!((slot.main.temp_max - (slot.main.temp + 2.0)).abs() < 1e-9);
            assert!(slot.main.temp_max >= slot.main.temp_min);
            assert!((60..90).contains(&slot.main.humidity));
            assert!((1.0..6.0).contains(&slot.wind.speed));
            assert_eq!(slot.weather.len(), 1);
            assert!(
                PALETTE
                    .iter()
                    .any(|sky| sky.description == slot.weather[0].description)
            );
        }
    }

    #[test]
    fn uv_index_is_between_one_and_ten() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let value = uv_index(&mut rng);
            assert!((1..=10).contains(&value));
        }
    }
}
