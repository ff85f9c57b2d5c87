//! Terminal rendering of a dashboard.
//!
//! Every function writes to the target it is given; nothing here holds on to
//! an output handle.

use std::io::{self, Write};

use weather_core::{Dashboard, ForecastDay, NormalizedObservation, WeatherCategory};

pub fn render_dashboard<W: Write>(out: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    render_theme(out, dashboard.category)?;
    render_todays_weather(out, &dashboard.observation)?;
    writeln!(out)?;
    render_icon_and_caption(out, &dashboard.observation, dashboard.category)?;
    writeln!(out)?;
    render_forecast(out, &dashboard.forecast)
}

pub fn render_theme<W: Write>(out: &mut W, category: WeatherCategory) -> io::Result<()> {
    writeln!(out, "[theme: {}]", category.theme_class())
}

pub fn render_todays_weather<W: Write>(
    out: &mut W,
    observation: &NormalizedObservation,
) -> io::Result<()> {
    writeln!(out, "{} | {}°C", observation.weather_description, observation.temperature)?;
    writeln!(out, "sunrise {}", observation.sunrise)?;
    writeln!(out, "sunset {}", observation.sunset)
}

pub fn render_icon_and_caption<W: Write>(
    out: &mut W,
    observation: &NormalizedObservation,
    category: WeatherCategory,
) -> io::Result<()> {
    writeln!(out, "[{}] {}", category.icon_path(), category.caption(&observation.city_name))
}

pub fn render_forecast<W: Write>(out: &mut W, forecast: &[ForecastDay]) -> io::Result<()> {
    for day in forecast {
        writeln!(out, "{:<4} {}°C", day.date.format("%a").to_string(), day.temperature)?;
    }
    Ok(())
}
