mod anthropic;
mod gemini;
mod openai;

use std::collections::HashMap;

use serde_json::Value;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

use crate::prompt::{Prompt, PromptMode};
use crate::provider::ProviderKey;

/// Provider-specific request building and response parsing strategy. One
/// implementation per provider; the service drives them uniformly.
pub trait ProviderAdapter: Send + Sync {
    fn key(&self) -> ProviderKey;

    /// Whether this provider takes one combined prompt or separate
    /// system/user messages.
    fn prompt_mode(&self) -> PromptMode {
        PromptMode::Combined
    }

    /// Request URL; some providers embed the API key here instead of in a
    /// header.
    fn endpoint(&self, model: &str, api_key: &str) -> String;

    fn headers(&self, api_key: &str) -> Vec<(&'static str, String)>;

    fn body(&self, model: &str, max_output_tokens: u32, prompt: &Prompt) -> Value;

    /// Pull the generated text out of the parsed response body. Each
    /// provider nests it at a different path.
    fn extract_content(&self, response: &Value) -> Option<String>;

    /// Provider-specific sanity check on extracted content.
    fn validate_response(&self, _content: &str) -> bool {
        true
    }
}

/// Explicit adapter lookup, built once at startup and shared by reference.
pub struct AdapterRegistry {
    adapters: HashMap<ProviderKey, Box<dyn ProviderAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Registry holding every built-in provider adapter.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(OpenAiAdapter));
        registry.register(Box::new(AnthropicAdapter));
        registry.register(Box::new(GeminiAdapter));
        registry
    }

    pub fn register(&mut self, adapter: Box<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.key(), adapter);
    }

    pub fn get(&self, key: ProviderKey) -> Option<&dyn ProviderAdapter> {
        self.adapters.get(&key).map(Box::as_ref)
    }

    /// Registered providers in declaration order.
    pub fn providers(&self) -> Vec<ProviderKey> {
        ProviderKey::ALL
            .into_iter()
            .filter(|key| self.adapters.contains_key(key))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
