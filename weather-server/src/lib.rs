//! HTTP front end for the temperature aggregator.
//!
//! Routes:
//! - `GET /` greets
//! - `GET /weather/{city}` returns `{city, temp, took}` or a 500 with the error text

use std::{sync::Arc, time::Instant};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use weather_core::{AggregateError, Aggregator, CityTemperature};

pub mod telemetry;

pub fn build_app(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/weather/", get(weather_without_city))
        .route("/weather/*city", get(weather))
        .with_state(aggregator)
}

/// Query the aggregator once and time it.
pub async fn lookup(aggregator: &Aggregator, city: &str) -> Result<CityTemperature, AggregateError> {
    let begin = Instant::now();
    let temp = aggregator.temperature(city).await?;

    Ok(CityTemperature { city: city.to_string(), temp, took: format!("{:?}", begin.elapsed()) })
}

async fn hello() -> &'static str {
    "Hello!"
}

/// `/weather/` with nothing after it queries providers with an empty city.
async fn weather_without_city(State(aggregator): State<Arc<Aggregator>>) -> Response {
    respond(&aggregator, String::new()).await
}

async fn weather(State(aggregator): State<Arc<Aggregator>>, Path(city): Path<String>) -> Response {
    respond(&aggregator, city).await
}

async fn respond(aggregator: &Aggregator, city: String) -> Response {
    match lookup(aggregator, &city).await {
        Ok(reading) => {
            tracing::info!(%city, temp = reading.temp, took = %reading.took, "served temperature");
            (StatusCode::OK, Json(reading)).into_response()
        }
        Err(err) => {
            tracing::warn!(%city, error = %err, "temperature query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
