use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherFetchError,
    model::{ForecastDay, NormalizedObservation},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Where a search gets its two halves of data from.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn get_current_weather(
        &self,
        city: &str,
    ) -> Result<NormalizedObservation, WeatherFetchError>;

    /// Future days only, one entry per calendar date, ascending.
    async fn get_forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherFetchError>;
}
