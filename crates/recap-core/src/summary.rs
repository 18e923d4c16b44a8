use std::sync::Arc;

use futures::future::join_all;
use uuid::Uuid;

use crate::adapters::{AdapterRegistry, ProviderAdapter};
use crate::error::{Result, SummaryError};
use crate::format::format_transcript_with_timestamps;
use crate::prompt::build_prompt;
use crate::provider::{ProviderKey, Settings};
use crate::retry::{RetryPolicy, retry_with_backoff};
use crate::templates::default_template;
use crate::transport::{ProviderResponse, SummaryTransport};
use crate::types::{ProcessedTranscript, SummaryResult, SummaryStyle};
use crate::validate::validate_summary;

/// Orchestrates prompt building, adapter dispatch, retry, validation, and
/// multi-provider aggregation. Failures never cross this boundary as
/// errors; every call resolves to a [`SummaryResult`].
pub struct SummaryService {
    transport: Arc<dyn SummaryTransport>,
    registry: Arc<AdapterRegistry>,
    settings: Arc<Settings>,
    retry: RetryPolicy,
}

impl SummaryService {
    pub fn new(
        transport: Arc<dyn SummaryTransport>,
        registry: Arc<AdapterRegistry>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            transport,
            registry,
            settings,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Generate one summary with the built-in template for the style.
    pub async fn generate_summary(
        &self,
        provider: ProviderKey,
        transcript: &ProcessedTranscript,
        style: SummaryStyle,
        video_url: Option<&str>,
    ) -> SummaryResult {
        self.generate_summary_with_template(provider, None, transcript, style, video_url)
            .await
    }

    /// Generate one summary, optionally with an externally supplied
    /// template.
    pub async fn generate_summary_with_template(
        &self,
        provider: ProviderKey,
        template: Option<&str>,
        transcript: &ProcessedTranscript,
        style: SummaryStyle,
        video_url: Option<&str>,
    ) -> SummaryResult {
        let model = self.settings.model_name(provider);
        let template = template.unwrap_or_else(|| default_template(style));
        match self
            .run_pipeline(provider, &model, template, transcript, style, video_url)
            .await
        {
            Ok(summary) => SummaryResult::ok(provider, model, summary),
            Err(error) => {
                tracing::warn!(provider = %provider, error = %error, "summary generation failed");
                SummaryResult::failed(provider, model, &error)
            }
        }
    }

    /// Fan out to the given providers concurrently. Pipelines are fully
    /// independent: one provider exhausting its retries does not cancel or
    /// delay the others. One result per requested provider, tagged by key.
    pub async fn generate_summaries(
        &self,
        providers: &[ProviderKey],
        template: Option<&str>,
        transcript: &ProcessedTranscript,
        style: SummaryStyle,
        video_url: Option<&str>,
    ) -> Vec<SummaryResult> {
        let pipelines = providers.iter().map(|&provider| {
            self.generate_summary_with_template(provider, template, transcript, style, video_url)
        });
        join_all(pipelines).await
    }

    /// Fan out to every registered provider.
    pub async fn generate_all_summaries(
        &self,
        transcript: &ProcessedTranscript,
        style: SummaryStyle,
        video_url: Option<&str>,
    ) -> Vec<SummaryResult> {
        let providers = self.registry.providers();
        self.generate_summaries(&providers, None, transcript, style, video_url)
            .await
    }

    async fn run_pipeline(
        &self,
        provider: ProviderKey,
        model: &str,
        template: &str,
        transcript: &ProcessedTranscript,
        style: SummaryStyle,
        video_url: Option<&str>,
    ) -> Result<String> {
        let adapter = self
            .registry
            .get(provider)
            .ok_or(SummaryError::UnregisteredProvider { provider })?;

        // Checked before any network traffic: a missing key is fatal, not
        // transient.
        let api_key = self.settings.api_key(provider)?;

        let transcript_text = format_transcript_with_timestamps(&transcript.segments);
        let prompt = build_prompt(template, &transcript_text, style, video_url, adapter.prompt_mode());
        let url = adapter.endpoint(model, &api_key);
        let headers = adapter.headers(&api_key);
        let body = adapter.body(model, provider.config().max_output_tokens, &prompt);

        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, provider = %provider, model, style = %style, "requesting summary");

        retry_with_backoff(self.retry, |attempt| {
            let url = &url;
            let headers = &headers;
            let body = &body;
            async move {
                tracing::debug!(%request_id, attempt, "dispatching provider request");
                let response = self.transport.post_json(url, headers, body).await?;
                let content = extract_response(provider, adapter, response)?;
                validate_summary(&content, style)?;
                if !adapter.validate_response(&content) {
                    return Err(SummaryError::MalformedResponse { provider });
                }
                Ok(content)
            }
        })
        .await
    }
}

fn extract_response(
    provider: ProviderKey,
    adapter: &dyn ProviderAdapter,
    response: ProviderResponse,
) -> Result<String> {
    match response.status {
        200..=299 => adapter
            .extract_content(&response.body)
            .ok_or(SummaryError::MalformedResponse { provider }),
        401 | 403 => Err(SummaryError::Auth {
            provider,
            status: response.status,
        }),
        429 => Err(SummaryError::RateLimited { provider }),
        status => Err(SummaryError::Status { provider, status }),
    }
}
