use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::NormalizedObservation;

/// Coarse weather bucket used to pick the dashboard theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
}

impl WeatherCategory {
    /// Map a provider description onto a category.
    ///
    /// Only exact, case-insensitive "clear", "rain" and "snow" are recognized;
    /// everything else is `Clouds`.
    pub fn from_description(description: &str) -> Self {
        match description.to_lowercase().as_str() {
            "clear" => WeatherCategory::Clear,
            "rain" => WeatherCategory::Rain,
            "snow" => WeatherCategory::Snow,
            _ => WeatherCategory::Clouds,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "Clear",
            WeatherCategory::Clouds => "Clouds",
            WeatherCategory::Rain => "Rain",
            WeatherCategory::Snow => "Snow",
        }
    }

    pub const fn all() -> &'static [WeatherCategory] {
        &[
            WeatherCategory::Clear,
            WeatherCategory::Clouds,
            WeatherCategory::Rain,
            WeatherCategory::Snow,
        ]
    }

    /// Lower-case theme name, e.g. "clouds".
    pub fn theme_class(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "clear",
            WeatherCategory::Clouds => "clouds",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Snow => "snow",
        }
    }

    pub fn icon_path(&self) -> String {
        format!("Assets/{}.png", self.as_str())
    }

    /// Caption shown next to the icon.
    pub fn caption(&self, city: &str) -> String {
        let template = match self {
            WeatherCategory::Clear => "Get your sunnies on. {city} is looking rather great today.",
            WeatherCategory::Rain => "Don't forget your umbrella. It's wet in {city} today.",
            WeatherCategory::Clouds => "Light a fire and get cosy. {city} is looking grey today.",
            WeatherCategory::Snow => "Time for a snowball fight! {city} is covered in snow.",
        };

        template.replace("{city}", city)
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(observation: &NormalizedObservation) -> WeatherCategory {
    WeatherCategory::from_description(&observation.weather_description)
}
