//! Turns the forecast channel and the hourly UV rows into one [`WeatherSnapshot`].

use crate::{
    convert::{celsius_text, hourly_stamp_hour, nearest_hour, parse_degrees},
    error::{AggregateError, PayloadError},
    model::{
        Astronomy, Currently, DailyForecast, Location, LocationQuery, Today, UvReading,
        WeatherSnapshot,
    },
    provider::{Channel, ChannelDay, ForecastSource, UvRecord, UvSource},
};

#[derive(Debug)]
pub struct Aggregator<F, U> {
    forecast: F,
    uv: U,
}

impl<F: ForecastSource, U: UvSource> Aggregator<F, U> {
    pub fn new(forecast: F, uv: U) -> Self {
        Self { forecast, uv }
    }

    /// Fetches and merges weather for `query`.
    ///
    /// Only the forecast request can fail the load. For US locations the UV
    /// provider is asked as well; if it errors or has nothing, the snapshot is
    /// returned without UV fields.
    pub async fn load(&self, query: &LocationQuery) -> Result<WeatherSnapshot, AggregateError> {
        let location = query.as_query();
        let channel = self.forecast.channel(&location).await?.ok_or(PayloadError::NoResults)?;
        let mut snapshot = snapshot_from_channel(channel)?;

        if snapshot.location.is_united_states() {
            let city = snapshot.location.city.clone();
            let region = snapshot.location.region.clone();
            match self.uv.hourly(&city, &region).await {
                Ok(records) if records.is_empty() => {
                    tracing::debug!(%city, %region, "no UV data for location");
                }
                Ok(records) => enrich_with_uv(&mut snapshot, &records),
                Err(err) => {
                    tracing::warn!(%city, %region, error = %format!("{err:#}"), "UV lookup failed");
                }
            }
        }

        tracing::info!(
            city = %snapshot.location.city,
            region = %snapshot.location.region,
            uv = snapshot.today.high_uv.is_some(),
            "weather loaded"
        );
        Ok(snapshot)
    }
}

/// Reshapes a channel into a snapshot: the first forecast day becomes
/// `today`, the rest stay in `forecast`, and every Fahrenheit value gets its
/// Celsius twin.
///
/// The current and today temperatures must be numbers. A later day with an
/// unreadable temperature is kept with that Celsius field left empty.
pub fn snapshot_from_channel(channel: Channel) -> Result<WeatherSnapshot, PayloadError> {
    let Channel { link, location, astronomy, item } = channel;

    let mut days = item.forecast.into_iter();
    let first = days.next().ok_or(PayloadError::EmptyForecast)?;

    let condition = item.condition;
    let alt_temp = celsius(&condition.temp, "currently.temp")?;
    let alt_high = celsius(&first.high, "today.high")?;
    let alt_low = celsius(&first.low, "today.low")?;

    let forecast = days.map(daily).collect();

    Ok(WeatherSnapshot {
        link,
        location: Location {
            city: location.city,
            country: location.country,
            region: location.region,
            lat: item.lat,
            long: item.long,
        },
        astronomy: Astronomy { sunrise: astronomy.sunrise, sunset: astronomy.sunset },
        currently: Currently {
            code: condition.code,
            date: condition.date,
            temp: condition.temp,
            alt_temp,
            text: condition.text,
            uv: None,
        },
        today: Today {
            code: first.code,
            date: first.date,
            day: first.day,
            high: first.high,
            low: first.low,
            alt_high,
            alt_low,
            text: first.text,
            high_uv: None,
            uv: None,
        },
        forecast,
    })
}

fn daily(day: ChannelDay) -> DailyForecast {
    DailyForecast {
        alt_high: later_celsius(&day.high, &day.date, "high"),
        alt_low: later_celsius(&day.low, &day.date, "low"),
        code: day.code,
        date: day.date,
        day: day.day,
        high: day.high,
        low: day.low,
        text: day.text,
    }
}

fn celsius(fahrenheit: &str, field: &'static str) -> Result<String, PayloadError> {
    celsius_text(fahrenheit)
        .ok_or_else(|| PayloadError::Temperature { field, value: fahrenheit.to_string() })
}

fn later_celsius(fahrenheit: &str, date: &str, which: &str) -> String {
    celsius_text(fahrenheit).unwrap_or_else(|| {
        tracing::warn!(%date, which, value = %fahrenheit, "forecast temperature unreadable");
        String::new()
    })
}

/// Hourly readings in provider order. Rows whose timestamp can't be read are dropped.
pub fn hourly_readings(records: &[UvRecord]) -> Vec<UvReading> {
    records
        .iter()
        .filter_map(|record| match hourly_stamp_hour(&record.date_time) {
            Ok(hour) => Some(UvReading::new(hour, record.uv_text())),
            Err(err) => {
                tracing::warn!(%err, "skipping UV row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UvSummary {
    /// Highest reading of the day, `"0"` when there are none.
    pub high: String,
    /// Reading for `current_hour`, if one was listed.
    pub current: Option<String>,
}

/// One left-to-right pass that keeps the running maximum and picks out the
/// reading for the current hour.
pub fn fold_uv(readings: &[UvReading], current_hour: Option<&str>) -> UvSummary {
    let mut current = None;

    let high = readings.iter().fold(String::from("0"), |acc, reading| {
        if current_hour == Some(reading.hour.as_str()) {
            current = Some(reading.uv.clone());
        }

        match (parse_degrees(&reading.uv), parse_degrees(&acc)) {
            (Some(value), Some(max)) if value > max => reading.uv.clone(),
            _ => acc,
        }
    });

    UvSummary { high, current }
}

/// Attaches hourly UV, today's peak and the reading for the observation hour.
pub fn enrich_with_uv(snapshot: &mut WeatherSnapshot, records: &[UvRecord]) {
    let readings = hourly_readings(records);

    let current_hour = match nearest_hour(&snapshot.currently.date) {
        Ok(hour) => Some(hour),
        Err(err) => {
            tracing::warn!(%err, "observation time unreadable, current UV left unset");
            None
        }
    };

    let summary = fold_uv(&readings, current_hour.as_deref());

    snapshot.currently.uv = summary.current;
    snapshot.today.high_uv = Some(summary.high);
    snapshot.today.uv = Some(readings);
}
