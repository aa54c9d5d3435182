use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::ProviderError, units::celsius_to_kelvin};

use super::{ProviderId, TemperatureProvider, truncate_body};

pub const DEFAULT_BASE_URL: &str = "http://api.wunderground.com";

/// Weather Underground conditions provider. Reports Celsius natively and
/// needs an API key.
#[derive(Debug, Clone)]
pub struct WeatherUndergroundProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherUndergroundProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct WuObservation {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WuResponse {
    current_observation: WuObservation,
}

#[async_trait]
impl TemperatureProvider for WeatherUndergroundProvider {
    async fn temperature(&self, city: &str) -> Result<f64, ProviderError> {
        let provider = ProviderId::WeatherUnderground;

        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingApiKey { provider });
        };

        let url = format!("{}/api/{key}/conditions/q/{city}.json", self.base_url);

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| ProviderError::Transport { provider, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status { provider, status, body: truncate_body(&body) });
        }

        let parsed: WuResponse = serde_json::from_str(&body)
            .map_err(|source| ProviderError::Decode { provider, source })?;

        let celsius = parsed.current_observation.temp_c;
        let kelvin = celsius_to_kelvin(celsius);
        tracing::info!("Weather Underground responded with {celsius:.2}C ({kelvin:.2}K) for {city}");

        Ok(kelvin)
    }
}
