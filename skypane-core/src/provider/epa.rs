use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{UvRecord, UvSource, truncate_body};

pub const DEFAULT_ENDPOINT: &str =
    "http://iaspub.epa.gov/enviro/efservice/getEnvirofactsUVHOURLY";

#[derive(Debug, Clone)]
pub struct EpaUvProvider {
    endpoint: String,
    http: Client,
}

impl EpaUvProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `<endpoint>/CITY/<city>/STATE/<state>/JSON`, segments percent-encoded.
    pub fn hourly_url(&self, city: &str, state: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid UV endpoint: {}", self.endpoint))?;

        url.path_segments_mut()
            .map_err(|_| anyhow!("UV endpoint cannot take path segments: {}", self.endpoint))?
            .pop_if_empty()
            .extend(["CITY", city, "STATE", state, "JSON"]);

        Ok(url)
    }
}

#[async_trait]
impl UvSource for EpaUvProvider {
    async fn hourly(&self, city: &str, state: &str) -> Result<Vec<UvRecord>> {
        let url = self.hourly_url(city, state)?;
        tracing::debug!(%url, "requesting hourly UV");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send request to UV provider")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read UV response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "UV request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&body).context("Failed to parse UV JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_url_encodes_city_and_state() {
        let p = EpaUvProvider::new("http://example.test/getEnvirofactsUVHOURLY/");
        let url = p.hourly_url("New York", "NY").unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.test/getEnvirofactsUVHOURLY/CITY/New%20York/STATE/NY/JSON"
        );
    }

    #[test]
    fn hourly_url_rejects_bad_endpoint() {
        let p = EpaUvProvider::new("not a url");
        assert!(p.hourly_url("Philadelphia", "PA").is_err());
    }
}
