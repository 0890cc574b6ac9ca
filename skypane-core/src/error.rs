use thiserror::Error;

/// A time-of-day string did not contain anything we could read as `H:MM am/pm`
/// (or `HH am/pm` for hourly UV stamps).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized time text: {text:?}")]
pub struct TimeParseError {
    pub text: String,
}

impl TimeParseError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The primary forecast payload arrived but can't be turned into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("forecast provider returned no results for this location")]
    NoResults,

    #[error("forecast list is empty, nothing to use for today")]
    EmptyForecast,

    #[error("{field} is not a temperature: {value:?}")]
    Temperature { field: &'static str, value: String },
}

/// Why an aggregation produced no snapshot.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Transport, HTTP status or JSON decoding failure on the primary request.
    #[error("forecast request failed: {0:#}")]
    Primary(#[from] anyhow::Error),

    #[error("forecast payload unusable: {0}")]
    Payload(#[from] PayloadError),
}
