//! Core library for the `skypane` weather page.
//!
//! This crate defines:
//! - The normalized weather snapshot and the two provider clients feeding it
//! - Aggregation: reshaping, Fahrenheit to Celsius, US-only UV enrichment
//! - Rendering of display regions and background selection
//! - Session state (live snapshot, unit flag, request tickets) and configuration
//!
//! It is used by `skypane-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod background;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;
pub mod session;

pub use aggregate::Aggregator;
pub use background::{Background, ConditionCategory, ConditionCode, DayPhase, select_background};
pub use config::{Config, HomeLocation, ProviderConfig};
pub use error::{AggregateError, PayloadError, TimeParseError};
pub use model::{LocationQuery, WeatherSnapshot};
pub use present::{PageRegions, render};
pub use provider::{ForecastSource, ProviderId, UvSource};
pub use session::{BackgroundChange, RequestTicket, Session};
