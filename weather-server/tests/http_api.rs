use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use weather_core::{
    Aggregator, CityTemperature, ProviderError, ProviderId, TemperatureProvider,
    provider::wunderground::WeatherUndergroundProvider,
};

#[derive(Debug)]
struct FixedKelvin(f64);

#[async_trait]
impl TemperatureProvider for FixedKelvin {
    async fn temperature(&self, _city: &str) -> Result<f64, ProviderError> {
        Ok(self.0)
    }
}

#[derive(Debug)]
struct EchoCity(std::sync::Mutex<Vec<String>>);

#[async_trait]
impl TemperatureProvider for EchoCity {
    async fn temperature(&self, city: &str) -> Result<f64, ProviderError> {
        self.0.lock().unwrap().push(city.to_string());
        Ok(273.15)
    }
}

fn app(providers: Vec<Arc<dyn TemperatureProvider>>) -> axum::Router {
    weather_server::build_app(Arc::new(Aggregator::new(providers)))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = res.status();
    let content_type = res
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn root_says_hello() {
    let (status, _, body) = get(app(vec![Arc::new(FixedKelvin(300.0))]), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello!");
}

#[tokio::test]
async fn weather_returns_average_as_json() {
    let providers: Vec<Arc<dyn TemperatureProvider>> =
        vec![Arc::new(FixedKelvin(300.0)), Arc::new(FixedKelvin(298.15))];

    let (status, content_type, body) = get(app(providers), "/weather/london").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));

    let reading: CityTemperature = serde_json::from_str(&body).unwrap();
    assert_eq!(reading.city, "london");
    assert!((reading.temp - 78.665).abs() < 0.01);
    assert!(!reading.took.is_empty());
}

#[tokio::test]
async fn provider_failure_maps_to_500_with_message() {
    // No key configured: the provider fails before any network I/O.
    let providers: Vec<Arc<dyn TemperatureProvider>> = vec![
        Arc::new(FixedKelvin(300.0)),
        Arc::new(WeatherUndergroundProvider::new(None)),
    ];

    let (status, _, body) = get(app(providers), "/weather/london").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, format!("{} API key must be set", ProviderId::WeatherUnderground));
}

#[tokio::test]
async fn empty_provider_list_maps_to_500() {
    let (status, _, body) = get(app(Vec::new()), "/weather/london").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("no temperature providers"));
}

#[tokio::test]
async fn city_path_is_passed_through() {
    let echo = Arc::new(EchoCity(std::sync::Mutex::new(Vec::new())));
    let providers = vec![echo.clone() as Arc<dyn TemperatureProvider>];

    let (status, _, body) = get(app(providers), "/weather/New%20York/US").await;

    assert_eq!(status, StatusCode::OK);
    let reading: CityTemperature = serde_json::from_str(&body).unwrap();
    assert_eq!(reading.city, "New York/US");
    assert!((reading.temp - 32.0).abs() < 1e-9);
    assert_eq!(*echo.0.lock().unwrap(), vec!["New York/US".to_string()]);
}

#[tokio::test]
async fn empty_city_is_still_queried() {
    let echo = Arc::new(EchoCity(std::sync::Mutex::new(Vec::new())));
    let providers = vec![echo.clone() as Arc<dyn TemperatureProvider>];

    let (status, _, body) = get(app(providers), "/weather/").await;

    assert_eq!(status, StatusCode::OK);
    let reading: CityTemperature = serde_json::from_str(&body).unwrap();
    assert_eq!(reading.city, "");
    assert_eq!(*echo.0.lock().unwrap(), vec![String::new()]);
}

#[tokio::test]
async fn empty_city_failure_maps_to_500() {
    let providers: Vec<Arc<dyn TemperatureProvider>> =
        vec![Arc::new(WeatherUndergroundProvider::new(None))];

    let (status, _, body) = get(app(providers), "/weather/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Weather Underground API key must be set");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _, _) = get(app(vec![Arc::new(FixedKelvin(300.0))]), "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
