use thiserror::Error;

use crate::provider::ProviderKey;
use crate::types::SummaryStyle;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{setting} is not configured")]
    MissingApiKey { setting: &'static str },

    #[error("no adapter registered for {provider}")]
    UnregisteredProvider { provider: ProviderKey },

    #[error("{provider} rejected the API key (HTTP {status})")]
    Auth { provider: ProviderKey, status: u16 },

    #[error("{provider} rate limit exceeded, try again later")]
    RateLimited { provider: ProviderKey },

    #[error("{provider} request failed with HTTP {status}")]
    Status { provider: ProviderKey, status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("{provider} returned an unexpected response shape")]
    MalformedResponse { provider: ProviderKey },

    #[error("model refused to summarize the transcript")]
    Refusal,

    #[error("summary too short ({length} chars)")]
    TooShort { length: usize },

    #[error("{style} summary is missing its numbered sections")]
    MissingSections { style: SummaryStyle },
}

impl SummaryError {
    /// Fatal errors skip the retry loop entirely. Everything else is
    /// transient and eligible for backoff.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SummaryError::MissingApiKey { .. }
                | SummaryError::UnregisteredProvider { .. }
                | SummaryError::Auth { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;
