use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

/// Failure of a single provider query.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to send request to {provider}: {source}")]
    Transport {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status { provider: ProviderId, status: StatusCode, body: String },

    #[error("failed to parse {provider} response: {source}")]
    Decode {
        provider: ProviderId,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} API key must be set")]
    MissingApiKey { provider: ProviderId },
}

/// Failure of an aggregate query across all providers.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no temperature providers configured")]
    NoProviders,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("a provider task ended without reporting a temperature")]
    Incomplete,
}
