//! Recap Core Library
//!
//! Core functionality for turning raw video caption documents into clean,
//! speaker-attributed transcripts and generating summaries from multiple
//! LLM providers concurrently.

pub mod adapters;
pub mod captions;
pub mod error;
pub mod format;
pub mod normalize;
pub mod process;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod speaker;
pub mod summary;
pub mod templates;
pub mod transport;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root
pub use adapters::{AdapterRegistry, AnthropicAdapter, GeminiAdapter, OpenAiAdapter, ProviderAdapter};
pub use captions::{parse_srt_timestamp, parse_transcript};
pub use error::{Result, SummaryError};
pub use format::{format_srt_timestamp, format_timestamp, format_transcript_with_timestamps};
pub use normalize::{clean_caption_text, deduplicate_segments};
pub use process::{ProcessOptions, process_transcript};
pub use prompt::{Prompt, PromptMode, build_prompt};
pub use provider::{ProviderConfig, ProviderKey, Settings};
pub use retry::{RetryPolicy, retry_with_backoff};
pub use speaker::{Speaker, SpeakerAttributor, classify_speaker};
pub use summary::SummaryService;
pub use templates::default_template;
pub use transport::{HttpTransport, ProviderResponse, SummaryTransport};
pub use types::{ProcessedTranscript, Segment, SummaryResult, SummaryStyle};
