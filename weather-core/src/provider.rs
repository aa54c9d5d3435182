use crate::{
    Config,
    error::ProviderError,
    provider::{openweathermap::OpenWeatherMapProvider, wunderground::WeatherUndergroundProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweathermap;
pub mod wunderground;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
    WeatherUnderground,
}

impl ProviderId {
    /// Short name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "openweathermap",
            ProviderId::WeatherUnderground => "wunderground",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "OpenWeatherMap",
            ProviderId::WeatherUnderground => "Weather Underground",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeatherMap, ProviderId::WeatherUnderground]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweathermap" => Ok(ProviderId::OpenWeatherMap),
            "wunderground" => Ok(ProviderId::WeatherUnderground),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweathermap, wunderground."
            )),
        }
    }
}

/// A source of temperature readings for a city.
///
/// Implementations must report in Kelvin, whatever unit the upstream uses.
/// The city name is passed through to the upstream query unescaped.
#[async_trait]
pub trait TemperatureProvider: Send + Sync + Debug {
    async fn temperature(&self, city: &str) -> Result<f64, ProviderError>;
}

/// Construct one provider from config.
///
/// A missing API key is not an error here: key-requiring providers
/// reject each query instead, so the server can start without credentials.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Arc<dyn TemperatureProvider> {
    let api_key = config.provider_api_key(id).map(str::to_owned);
    let base_url = config.provider_base_url(id);

    match id {
        ProviderId::OpenWeatherMap => {
            let mut provider = OpenWeatherMapProvider::new(api_key);
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
        ProviderId::WeatherUnderground => {
            let mut provider = WeatherUndergroundProvider::new(api_key);
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
    }
}

/// Construct every built-in provider, in `ProviderId::all()` order.
pub fn providers_from_config(config: &Config) -> Vec<Arc<dyn TemperatureProvider>> {
    ProviderId::all().iter().map(|id| provider_from_config(*id, config)).collect()
}

/// Shorten an upstream body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
