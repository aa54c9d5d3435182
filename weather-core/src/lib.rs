//! Core library for the multi-provider temperature service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over temperature providers, plus the built-in ones
//! - The aggregator that queries all providers concurrently
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod units;

pub use aggregator::Aggregator;
pub use config::{Config, ProviderConfig};
pub use error::{AggregateError, ProviderError};
pub use model::CityTemperature;
pub use provider::{ProviderId, TemperatureProvider};
