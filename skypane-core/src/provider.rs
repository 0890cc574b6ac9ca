use crate::{
    Config,
    provider::{epa::EpaUvProvider, yahoo::YahooForecastProvider},
};
use async_trait::async_trait;
use serde::Deserialize;
use std::{convert::TryFrom, fmt::Debug};

pub mod epa;
pub mod yahoo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Conditions, astronomy and the multi-day forecast.
    Forecast,
    /// Hourly UV index, US only.
    Uv,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Forecast => "forecast",
            ProviderId::Uv => "uv",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Forecast, ProviderId::Uv]
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderId::Forecast => yahoo::DEFAULT_ENDPOINT,
            ProviderId::Uv => epa::DEFAULT_ENDPOINT,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "forecast" => Ok(ProviderId::Forecast),
            "uv" => Ok(ProviderId::Uv),
            _ => Err(anyhow::anyhow!("Unknown provider '{value}'. Supported providers: forecast, uv.")),
        }
    }
}

/// The forecast provider's `channel` object, as delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub link: String,
    pub location: ChannelLocation,
    pub astronomy: ChannelAstronomy,
    pub item: ChannelItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelLocation {
    pub city: String,
    pub country: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelAstronomy {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub lat: String,
    pub long: String,
    pub condition: ChannelCondition,
    #[serde(default)]
    pub forecast: Vec<ChannelDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelCondition {
    pub code: String,
    pub date: String,
    pub temp: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDay {
    pub code: String,
    pub date: String,
    pub day: String,
    pub high: String,
    pub low: String,
    pub text: String,
}

/// One hourly UV forecast row.
#[derive(Debug, Clone, Deserialize)]
pub struct UvRecord {
    /// e.g. `"AUG/18/2015 07 AM"`.
    #[serde(rename = "DATE_TIME")]
    pub date_time: String,
    #[serde(rename = "UV_VALUE")]
    pub uv_value: serde_json::Value,
}

impl UvRecord {
    /// The UV value as text whether the provider sent a number or a string.
    pub fn uv_text(&self) -> String {
        match &self.uv_value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Looks up `location` and returns its channel, or `None` when the
    /// provider found no place for it.
    async fn channel(&self, location: &str) -> anyhow::Result<Option<Channel>>;
}

#[async_trait]
pub trait UvSource: Send + Sync + Debug {
    /// Hourly UV rows for a US city; an empty list means no data.
    async fn hourly(&self, city: &str, state: &str) -> anyhow::Result<Vec<UvRecord>>;
}

/// Construct both providers from their configured endpoints.
pub fn providers_from_config(config: &Config) -> (YahooForecastProvider, EpaUvProvider) {
    (
        YahooForecastProvider::new(config.endpoint(ProviderId::Forecast)),
        EpaUvProvider::new(config.endpoint(ProviderId::Uv)),
    )
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
