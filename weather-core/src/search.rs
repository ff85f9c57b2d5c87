use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, instrument};

use crate::{classify::classify, error::WeatherFetchError, model::Dashboard, provider::WeatherSource};

/// Trimmed user input, or `default_city` when the input is blank.
pub fn resolve_city<'a>(input: Option<&'a str>, default_city: &'a str) -> &'a str {
    match input.map(str::trim) {
        Some(city) if !city.is_empty() => city,
        _ => default_city.trim(),
    }
}

/// Fetch current conditions and forecast concurrently and classify.
///
/// Both requests must succeed; if either fails the other result is dropped.
#[instrument(skip(source))]
pub async fn search<S>(source: &S, city: &str) -> Result<Dashboard, WeatherFetchError>
where
    S: WeatherSource + ?Sized,
{
    let (observation, forecast) =
        tokio::try_join!(source.get_current_weather(city), source.get_forecast(city))?;

    let category = classify(&observation);
    info!(city = %observation.city_name, %category, days = forecast.len(), "search complete");

    Ok(Dashboard { observation, category, forecast })
}

/// Ticket handed out when a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

/// Orders overlapping searches so a slow, older response never replaces a
/// newer one. Searches are not cancelled; stale results are just dropped.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchToken {
        SearchToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: SearchToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Run a search. `Ok(None)` means a newer search started while this one
    /// was in flight.
    pub async fn search<S>(
        &self,
        source: &S,
        city: &str,
    ) -> Result<Option<Dashboard>, WeatherFetchError>
    where
        S: WeatherSource + ?Sized,
    {
        let token = self.begin();
        let result = search(source, city).await;

        if !self.is_current(token) {
            debug!(?token, city, "discarding stale search result");
            return Ok(None);
        }

        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::WeatherCategory,
        error::{Endpoint, FetchCause},
        model::{ForecastDay, NormalizedObservation},
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct FakeSource {
        fail_current: bool,
        fail_forecast: bool,
    }

    fn observation(city: &str, description: &str) -> NormalizedObservation {
        NormalizedObservation {
            city_name: city.into(),
            temperature: -4,
            weather_description: description.into(),
            weather_id: 600,
            sunrise: "08:41".into(),
            sunset: "14:50".into(),
        }
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn get_current_weather(
            &self,
            city: &str,
        ) -> Result<NormalizedObservation, WeatherFetchError> {
            if self.fail_current {
                return Err(WeatherFetchError::new(Endpoint::CurrentWeather, FetchCause::Status(500)));
            }
            Ok(observation(city, "Snow"))
        }

        async fn get_forecast(&self, _city: &str) -> Result<Vec<ForecastDay>, WeatherFetchError> {
            if self.fail_forecast {
                return Err(WeatherFetchError::new(Endpoint::Forecast, FetchCause::Transport));
            }
            Ok(vec![ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
                temperature: -6,
                weather_description: "light snow".into(),
                weather_id: 600,
            }])
        }
    }

    /// Answers slower for the city named "slow".
    #[derive(Debug)]
    struct DelayedSource;

    #[async_trait]
    impl WeatherSource for DelayedSource {
        async fn get_current_weather(
            &self,
            city: &str,
        ) -> Result<NormalizedObservation, WeatherFetchError> {
            if city == "slow" {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Ok(observation(city, "Clear"))
        }

        async fn get_forecast(&self, _city: &str) -> Result<Vec<ForecastDay>, WeatherFetchError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn resolve_city_falls_back_to_default() {
        assert_eq!(resolve_city(None, "Stockholm"), "Stockholm");
        assert_eq!(resolve_city(Some("   "), "Stockholm"), "Stockholm");
        assert_eq!(resolve_city(Some(" Oslo "), "Stockholm"), "Oslo");
    }

    #[tokio::test]
    async fn search_combines_both_halves() {
        let dashboard = search(&FakeSource::default(), "Kiruna").await.unwrap();

        assert_eq!(dashboard.observation.city_name, "Kiruna");
        assert_eq!(dashboard.category, WeatherCategory::Snow);
        assert_eq!(dashboard.forecast.len(), 1);
    }

    #[tokio::test]
    async fn either_failure_fails_the_search() {
        let current = FakeSource { fail_current: true, ..Default::default() };
        let err = search(&current, "Kiruna").await.unwrap_err();
        assert_eq!(err.endpoint(), Endpoint::CurrentWeather);

        let forecast = FakeSource { fail_forecast: true, ..Default::default() };
        let err = search(&forecast, "Kiruna").await.unwrap_err();
        assert_eq!(err.endpoint(), Endpoint::Forecast);
    }

    #[test]
    fn tokens_increase() {
        let session = SearchSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(second > first);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[tokio::test]
    async fn stale_search_is_discarded() {
        let session = SearchSession::new();
        let source = DelayedSource;

        let (slow, fast) = tokio::join!(session.search(&source, "slow"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.search(&source, "fast").await
        });

        assert_eq!(slow.unwrap(), None);
        let fast = fast.unwrap().expect("latest search must be kept");
        assert_eq!(fast.observation.city_name, "fast");
    }

    #[tokio::test]
    async fn current_failure_surfaces() {
        let session = SearchSession::new();
        let failing = FakeSource { fail_current: true, ..Default::default() };

        let err = session.search(&failing, "Kiruna").await.unwrap_err();
        assert_eq!(err.cause(), FetchCause::Status(500));
    }
}
