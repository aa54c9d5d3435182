//! Concurrent fan-out of a temperature query to every provider, with
//! fan-in of the results into a single Fahrenheit average.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet};

use crate::{
    Config,
    error::AggregateError,
    provider::{TemperatureProvider, providers_from_config},
    units::kelvin_to_fahrenheit,
};

/// Immutable set of providers queried together.
///
/// Cheap to share: wrap it in an `Arc` and hand it to every request.
#[derive(Debug, Clone)]
pub struct Aggregator {
    providers: Vec<Arc<dyn TemperatureProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn TemperatureProvider>>) -> Self {
        Self { providers }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(providers_from_config(config))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Query every provider concurrently and return the average in Fahrenheit.
    ///
    /// The first provider error observed becomes the result. Providers still
    /// running at that point are aborted when the task set is dropped.
    pub async fn temperature(&self, city: &str) -> Result<f64, AggregateError> {
        let n = self.providers.len();
        if n == 0 {
            return Err(AggregateError::NoProviders);
        }

        let (temps_tx, mut temps) = mpsc::channel(n);
        let (errs_tx, mut errs) = mpsc::channel(n);
        let city: Arc<str> = Arc::from(city);

        let mut tasks = JoinSet::new();
        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let city = Arc::clone(&city);
            let temps_tx = temps_tx.clone();
            let errs_tx = errs_tx.clone();

            tasks.spawn(async move {
                // Sends only fail once the receiver is gone, i.e. the query is already over.
                match provider.temperature(&city).await {
                    Ok(kelvin) => {
                        let _ = temps_tx.send(kelvin).await;
                    }
                    Err(err) => {
                        let _ = errs_tx.send(err).await;
                    }
                }
            });
        }
        // Only the tasks hold senders now, so both channels close if they all exit.
        drop(temps_tx);
        drop(errs_tx);

        let mut sum = 0.0;
        for _ in 0..n {
            tokio::select! {
                Some(kelvin) = temps.recv() => {
                    let fahrenheit = kelvin_to_fahrenheit(kelvin);
                    tracing::info!("{kelvin:.2}K converts to {fahrenheit:.2}F");
                    sum += fahrenheit;
                }
                Some(err) = errs.recv() => {
                    tracing::debug!(error = %err, outstanding = tasks.len(), "aborting provider query");
                    return Err(err.into());
                }
                else => return Err(AggregateError::Incomplete),
            }
        }

        Ok(sum / n as f64)
    }
}
