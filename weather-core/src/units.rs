//! Temperature unit conversions.
//!
//! Providers report in Kelvin; the aggregator averages in Fahrenheit.

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin * 1.8) - 459.67
}
