use serde::{Deserialize, Serialize};

/// Successful aggregate reading as returned to HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityTemperature {
    pub city: String,
    /// Average across all providers, in Fahrenheit.
    pub temp: f64,
    /// Wall-clock time spent on the query, human readable.
    pub took: String,
}
