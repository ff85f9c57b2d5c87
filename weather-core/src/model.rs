use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::WeatherCategory;

/// One condition entry as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    pub id: u32,
    /// Short category label, e.g. "Clear", "Rain".
    pub main: String,
    /// Free-text description, e.g. "light rain".
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Provider payload of the current-conditions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub name: String,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
    pub sys: RawSys,
}

/// A single 3-hour slice of the forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    /// Unix seconds, UTC.
    pub dt: i64,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastCity {
    pub name: String,
}

/// Provider payload of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawForecastFeed {
    pub list: Vec<RawForecastEntry>,
    #[serde(default)]
    pub city: Option<RawForecastCity>,
}

/// Current conditions in the shape the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedObservation {
    pub city_name: String,
    /// Whole degrees Celsius.
    pub temperature: i32,
    pub weather_description: String,
    pub weather_id: u32,
    /// Local "HH:MM".
    pub sunrise: String,
    /// Local "HH:MM".
    pub sunset: String,
}

/// The representative forecast sample for one future calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub temperature: i32,
    pub weather_description: String,
    pub weather_id: u32,
}

/// Everything one search produces for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub observation: NormalizedObservation,
    pub category: WeatherCategory,
    pub forecast: Vec<ForecastDay>,
}
