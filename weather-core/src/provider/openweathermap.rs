use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderError;

use super::{ProviderId, TemperatureProvider, truncate_body};

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// OpenWeatherMap current-conditions provider. Reports Kelvin natively.
#[derive(Debug, Clone)]
pub struct OpenWeatherMapProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherMapProvider {
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

    fn url(&self, city: &str) -> String {
        // City goes in as-is; reqwest only percent-encodes what the URL parser requires.
        let mut url = format!("{}/data/2.5/weather?q={city}", self.base_url);
        if let Some(key) = &self.api_key {
            url.push_str("&appid=");
            url.push_str(key);
        }
        url
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
}

#[async_trait]
impl TemperatureProvider for OpenWeatherMapProvider {
    async fn temperature(&self, city: &str) -> Result<f64, ProviderError> {
        let provider = ProviderId::OpenWeatherMap;

        let res = self
            .http
            .get(self.url(city))
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| ProviderError::Transport { provider, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status { provider, status, body: truncate_body(&body) });
        }

        let parsed: OwmResponse = serde_json::from_str(&body)
            .map_err(|source| ProviderError::Decode { provider, source })?;

        let kelvin = parsed.main.temp;
        tracing::info!("OpenWeatherMap responded with {kelvin:.2}K for {city}");

        Ok(kelvin)
    }
}
