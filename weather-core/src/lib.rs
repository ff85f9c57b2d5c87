//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the concurrent dashboard search
//! - Normalization of current conditions, forecast reduction to one sample
//!   per future day, and the coarse weather category used for theming
//!
//! Rendering is left to callers; everything here returns plain data.

pub mod classify;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod search;

pub use classify::{WeatherCategory, classify};
pub use config::{ClientSettings, Config};
pub use error::{Endpoint, FetchCause, WeatherFetchError};
pub use forecast::reduce_forecast;
pub use model::{
    Dashboard, ForecastDay, NormalizedObservation, RawForecastFeed, RawObservation,
};
pub use normalize::{format_clock, normalize_observation, round_temperature};
pub use provider::{OpenWeatherClient, WeatherSource};
pub use search::{SearchSession, SearchToken, resolve_city, search};
