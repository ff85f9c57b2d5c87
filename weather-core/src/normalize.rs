use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

use crate::model::{NormalizedObservation, RawCondition, RawObservation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("provider returned no weather conditions")]
    NoConditions,

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Round half up to whole degrees: 3.5 -> 4, -0.5 -> 0, -2.5 -> -2.
pub fn round_temperature(temp: f64) -> i32 {
    (temp + 0.5).floor() as i32
}

/// Format a Unix timestamp as 24-hour "HH:MM" in the given timezone.
pub fn format_clock(timestamp: i64, tz: Tz) -> Result<String, NormalizeError> {
    let utc = DateTime::from_timestamp(timestamp, 0)
        .ok_or(NormalizeError::TimestampOutOfRange(timestamp))?;

    Ok(utc.with_timezone(&tz).format("%H:%M").to_string())
}

/// Providers may list several simultaneous conditions; the first one wins.
pub(crate) fn primary_condition(conditions: &[RawCondition]) -> Option<&RawCondition> {
    conditions.first()
}

pub fn normalize_observation(
    raw: &RawObservation,
    tz: Tz,
) -> Result<NormalizedObservation, NormalizeError> {
    let condition = primary_condition(&raw.weather).ok_or(NormalizeError::NoConditions)?;

    Ok(NormalizedObservation {
        city_name: raw.name.clone(),
        temperature: round_temperature(raw.main.temp),
        weather_description: condition.main.clone(),
        weather_id: condition.id,
        sunrise: format_clock(raw.sys.sunrise, tz)?,
        sunset: format_clock(raw.sys.sunset, tz)?,
    })
}
