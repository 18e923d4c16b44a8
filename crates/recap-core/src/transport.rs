use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SummaryError};

/// Provider APIs can stall; every call is bounded by this.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Status code plus parsed body of one provider response. A body that is
/// not JSON parses to `Null`, which downstream extraction rejects.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Value,
}

/// The one network operation the summary service needs. Object-safe so
/// tests can substitute a scripted transport.
#[async_trait]
pub trait SummaryTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<ProviderResponse>;
}

/// reqwest-backed transport with fixed request and connect timeouts.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SummaryError::Network { reason: e.to_string() })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SummaryTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<ProviderResponse> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok(ProviderResponse { status, body })
    }
}

fn map_reqwest_error(error: reqwest::Error) -> SummaryError {
    if error.is_timeout() {
        SummaryError::Timeout
    } else {
        SummaryError::Network {
            reason: error.to_string(),
        }
    }
}
