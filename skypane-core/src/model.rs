use serde::{Deserialize, Serialize};

/// What the user asked for: a device position or whatever they typed.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { lat: f64, long: f64 },
    Text(String),
}

impl LocationQuery {
    /// The location string handed to the forecast provider.
    pub fn as_query(&self) -> String {
        match self {
            LocationQuery::Coordinates { lat, long } => format!("{lat},{long}"),
            LocationQuery::Text(text) => text.clone(),
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_query())
    }
}

/// Normalized weather for one location, built from the forecast provider and
/// (for US locations) enriched with hourly UV readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Attribution URL every rendered fragment links to.
    pub link: String,
    pub location: Location,
    pub astronomy: Astronomy,
    pub currently: Currently,
    pub today: Today,
    /// Days after today, in provider order.
    pub forecast: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub region: String,
    pub lat: String,
    pub long: String,
}

impl Location {
    pub fn is_united_states(&self) -> bool {
        self.country == "United States"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astronomy {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currently {
    pub code: String,
    pub date: String,
    /// Fahrenheit.
    pub temp: String,
    /// Celsius.
    pub alt_temp: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Today {
    pub code: String,
    pub date: String,
    pub day: String,
    pub high: String,
    pub low: String,
    pub alt_high: String,
    pub alt_low: String,
    pub text: String,
    #[serde(default, rename = "highUV", skip_serializing_if = "Option::is_none")]
    pub high_uv: Option<String>,
    /// Hourly readings, only for US locations with UV data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<Vec<UvReading>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub code: String,
    pub date: String,
    pub day: String,
    pub high: String,
    pub low: String,
    pub alt_high: String,
    pub alt_low: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UvReading {
    /// Two digit 24-hour hour, e.g. `"07"` or `"14"`.
    pub hour: String,
    pub uv: String,
}

impl UvReading {
    pub fn new(hour: impl Into<String>, uv: impl Into<String>) -> Self {
        Self { hour: hour.into(), uv: uv.into() }
    }
}
