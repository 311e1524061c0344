//! Plain-text rendering of a [`View`].

use chrono::NaiveDate;
use weather_core::{
    View,
    display::{RenderedPanel, date_header},
};

/// Text for `view`; `today` dates the weather panel.
pub fn format_view(view: &View, today: NaiveDate) -> String {
    match view {
        View::Idle => String::new(),
        View::Loading => "Loading weather data...".to_string(),
        View::Error(message) => format!("Error: {message}"),
        View::Weather { panel, forecast } => {
            let mut out = format_panel(panel, today);
            if !forecast.is_empty() {
                out.push_str("\n5-day forecast\n");
                for day in forecast {
                    out.push_str(&format!(
                        "  {:<4} {:<12} {}\n",
                        day.weekday(),
                        day.temp_range(),
                        day.description
                    ));
                }
            }
            out
        }
    }
}

fn format_panel(panel: &RenderedPanel, today: NaiveDate) -> String {
    [
        panel.title.clone(),
        format!("  {}", date_header(today)),
        format!("  {}  {}", panel.temperature, panel.description),
        format!("  Feels like  {}", panel.feels_like),
        format!("  Visibility  {}", panel.visibility),
        format!("  Humidity    {}", panel.humidity),
        format!("  Wind        {}", panel.wind),
        format!("  Pressure    {}", panel.pressure),
        format!("  UV index    {}", panel.uv),
        format!("  Icon        {}", panel.icon_url),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}
