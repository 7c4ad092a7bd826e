//! Core library for the `forecast` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and the summary generator
//! - Per-day forecast aggregation and condition classification
//! - The dashboard state that front-ends render
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod map;
pub mod model;
pub mod provider;
pub mod summary;

pub use aggregate::{DEFAULT_MAX_DAYS, aggregate_daily, aggregate_daily_in, temperature_series};
pub use condition::ConditionCategory;
pub use config::{Config, ForecastConfig, ProviderConfig};
pub use dashboard::{Dashboard, DashboardState};
pub use error::WeatherError;
pub use map::MapMarker;
pub use model::{
    DailyForecast, ForecastSample, QueryResult, TemperaturePoint, WeatherSnapshot,
    kelvin_to_celsius,
};
pub use provider::{ServiceId, WeatherProvider};
pub use summary::{Summarizer, fallback_summary};
