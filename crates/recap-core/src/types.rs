use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SummaryError;
use crate::provider::ProviderKey;

/// One timed unit of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub speaker: Option<String>,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
            speaker: None,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Fully cleaned, deduplicated and speaker-attributed transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedTranscript {
    pub segments: Vec<Segment>,
    pub speakers: HashSet<String>,
    pub total_duration: f64,
    pub word_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    Bullets,
    Narrative,
    Technical,
}

impl SummaryStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStyle::Bullets => "bullets",
            SummaryStyle::Narrative => "narrative",
            SummaryStyle::Technical => "technical",
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one (provider, request) pair. Provider failures end up here
/// instead of crossing the service boundary as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub provider: ProviderKey,
    pub model_name: String,
    pub summary: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl SummaryResult {
    pub fn ok(provider: ProviderKey, model_name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            provider,
            model_name: model_name.into(),
            summary: summary.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(provider: ProviderKey, model_name: impl Into<String>, error: &SummaryError) -> Self {
        Self {
            provider,
            model_name: model_name.into(),
            summary: String::new(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}
