use std::fmt;

use thiserror::Error;

/// Which provider endpoint a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrentWeather,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::CurrentWeather => "current weather",
            Endpoint::Forecast => "forecast",
        }
    }

    /// Path segment appended to the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CurrentWeather => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a fetch failed. Informational only; callers treat every cause alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCause {
    /// Provider answered with a non-success status.
    Status(u16),
    /// Connection, TLS, timeout or body read failure.
    Transport,
    /// Body was not the expected JSON.
    Decode,
    /// JSON decoded but could not be normalized (no conditions, bad timestamps).
    InvalidPayload,
    /// City was blank; nothing was sent.
    InvalidCity,
    /// The HTTP client could not be built.
    ClientInit,
}

impl fmt::Display for FetchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchCause::Status(code) => write!(f, "status {code}"),
            FetchCause::Transport => f.write_str("transport"),
            FetchCause::Decode => f.write_str("decode"),
            FetchCause::InvalidPayload => f.write_str("invalid payload"),
            FetchCause::InvalidCity => f.write_str("invalid city"),
            FetchCause::ClientInit => f.write_str("client init"),
        }
    }
}

/// The single failure kind of a weather request.
#[derive(Debug, Error)]
#[error("{endpoint} fetch failed")]
pub struct WeatherFetchError {
    endpoint: Endpoint,
    cause: FetchCause,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl WeatherFetchError {
    pub fn new(endpoint: Endpoint, cause: FetchCause) -> Self {
        Self { endpoint, cause, source: None }
    }

    pub fn with_source<E>(endpoint: Endpoint, cause: FetchCause, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self { endpoint, cause, source: Some(source.into()) }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn cause(&self) -> FetchCause {
        self.cause
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn message_is_opaque() {
        let err = WeatherFetchError::new(Endpoint::Forecast, FetchCause::Status(404));
        assert_eq!(err.to_string(), "forecast fetch failed");
        assert_eq!(err.cause(), FetchCause::Status(404));
        assert!(err.source().is_none());
    }

    #[test]
    fn source_is_kept() {
        let err = WeatherFetchError::with_source(
            Endpoint::CurrentWeather,
            FetchCause::InvalidPayload,
            "no conditions",
        );

        assert_eq!(err.to_string(), "current weather fetch failed");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("no conditions"));
    }
}
