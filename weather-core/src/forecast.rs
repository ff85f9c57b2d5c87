use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use tracing::debug;

use crate::{
    model::{ForecastDay, RawForecastFeed},
    normalize::{primary_condition, round_temperature},
};

/// Collapse a sub-daily feed into one sample per calendar day after `today`.
///
/// Dates are UTC calendar dates. The first entry seen for a date is kept and
/// later ones are dropped, so for a chronological feed each day is represented
/// by its earliest slice. Output is in ascending date order.
pub fn reduce_forecast(feed: &RawForecastFeed, today: NaiveDate) -> Vec<ForecastDay> {
    let mut days: BTreeMap<NaiveDate, ForecastDay> = BTreeMap::new();

    for entry in &feed.list {
        let Some(date) = DateTime::from_timestamp(entry.dt, 0).map(|dt| dt.date_naive()) else {
            debug!(dt = entry.dt, "skipping forecast entry with out-of-range timestamp");
            continue;
        };

        if date <= today || days.contains_key(&date) {
            continue;
        }

        let Some(condition) = primary_condition(&entry.weather) else {
            debug!(dt = entry.dt, "skipping forecast entry without conditions");
            continue;
        };

        days.insert(
            date,
            ForecastDay {
                date,
                temperature: round_temperature(entry.main.temp),
                weather_description: condition.description.clone(),
                weather_id: condition.id,
            },
        );
    }

    debug!(entries = feed.list.len(), days = days.len(), %today, "reduced forecast feed");

    days.into_values().collect()
}
