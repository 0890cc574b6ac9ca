use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{Channel, ForecastSource, truncate_body};

pub const DEFAULT_ENDPOINT: &str = "https://query.yahooapis.com/v1/public/yql";

#[derive(Debug, Clone)]
pub struct YahooForecastProvider {
    endpoint: String,
    http: Client,
}

impl YahooForecastProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Geocode the free text server-side, keep the first place, fetch its forecast.
pub fn forecast_statement(location: &str) -> String {
    format!(
        "select * from weather.forecast where woeid in \
         (select woeid from geo.placefinder where text=\"{location}\" and gflags=\"R\" limit 1)"
    )
}

#[derive(Debug, Deserialize)]
struct YqlResponse {
    query: YqlQuery,
}

#[derive(Debug, Deserialize)]
struct YqlQuery {
    results: Option<YqlResults>,
}

#[derive(Debug, Deserialize)]
struct YqlResults {
    channel: Channel,
}

#[async_trait]
impl ForecastSource for YahooForecastProvider {
    async fn channel(&self, location: &str) -> Result<Option<Channel>> {
        let statement = forecast_statement(location);
        tracing::debug!(endpoint = %self.endpoint, %statement, "requesting forecast");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", statement.as_str())])
            .send()
            .await
            .context("Failed to send request to forecast provider")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: YqlResponse =
            serde_json::from_str(&body).context("Failed to parse forecast JSON")?;

        Ok(parsed.query.results.map(|r| r.channel))
    }
}
