use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{
    config::ClientSettings,
    error::{Endpoint, FetchCause, WeatherFetchError},
    forecast::reduce_forecast,
    model::{ForecastDay, NormalizedObservation, RawForecastFeed, RawObservation},
    normalize::normalize_observation,
};

use super::WeatherSource;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    settings: ClientSettings,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(settings: ClientSettings) -> Result<Self, WeatherFetchError> {
        let http = Client::builder().timeout(settings.timeout).build().map_err(|e| {
            WeatherFetchError::with_source(Endpoint::CurrentWeather, FetchCause::ClientInit, e)
        })?;

        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Raw forecast feed, for callers that reduce against their own "today".
    #[instrument(skip(self))]
    pub async fn fetch_forecast_feed(&self, city: &str) -> Result<RawForecastFeed, WeatherFetchError> {
        self.fetch_json(Endpoint::Forecast, city).await
    }

    pub async fn get_forecast_after(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Result<Vec<ForecastDay>, WeatherFetchError> {
        let feed = self.fetch_forecast_feed(city).await?;
        Ok(reduce_forecast(&feed, today))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        city: &str,
    ) -> Result<T, WeatherFetchError> {
        let result = self.try_fetch_json(endpoint, city).await;

        if let Err(err) = &result {
            warn!(%endpoint, city, cause = %err.cause(), "weather fetch failed");
        }

        result
    }

    async fn try_fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        city: &str,
    ) -> Result<T, WeatherFetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherFetchError::new(endpoint, FetchCause::InvalidCity));
        }

        let url = format!("{}/{}", self.settings.base_url, endpoint.path());
        debug!(%endpoint, url = %url, city, "requesting weather data");

        // reqwest percent-encodes the query, so free-text city names are safe.
        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.settings.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherFetchError::with_source(endpoint, FetchCause::Transport, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherFetchError::with_source(endpoint, FetchCause::Transport, e))?;

        if !status.is_success() {
            debug!(%endpoint, %status, body = %truncate_body(&body), "provider returned an error");
            return Err(WeatherFetchError::new(endpoint, FetchCause::Status(status.as_u16())));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherFetchError::with_source(endpoint, FetchCause::Decode, e))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn get_current_weather(
        &self,
        city: &str,
    ) -> Result<NormalizedObservation, WeatherFetchError> {
        let raw: RawObservation = self.fetch_json(Endpoint::CurrentWeather, city).await?;

        normalize_observation(&raw, self.settings.timezone).map_err(|e| {
            warn!(city, error = %e, "current weather payload could not be normalized");
            WeatherFetchError::with_source(Endpoint::CurrentWeather, FetchCause::InvalidPayload, e)
        })
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherFetchError> {
        self.get_forecast_after(city, Utc::now().date_naive()).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
