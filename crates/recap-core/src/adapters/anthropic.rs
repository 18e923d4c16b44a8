use serde_json::{Value, json};

use crate::adapters::ProviderAdapter;
use crate::prompt::{Prompt, PromptMode};
use crate::provider::ProviderKey;

pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    fn key(&self) -> ProviderKey {
        ProviderKey::Anthropic
    }

    // The messages API separates behavioral instructions from task content.
    fn prompt_mode(&self) -> PromptMode {
        PromptMode::Split
    }

    fn endpoint(&self, _model: &str, _api_key: &str) -> String {
        "https://api.anthropic.com/v1/messages".to_string()
    }

    fn headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", "2023-06-01".to_string()),
            ("Content-Type", "application/json".to_string()),
        ]
    }

    fn body(&self, model: &str, max_output_tokens: u32, prompt: &Prompt) -> Value {
        let (system, user) = prompt.split_parts();
        let mut body = json!({
            "model": model,
            "max_tokens": max_output_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": user,
                },
            ],
        });
        if !system.is_empty() {
            body["system"] = json!(system);
        }
        body
    }

    fn extract_content(&self, response: &Value) -> Option<String> {
        response["content"][0]["text"].as_str().map(str::to_string)
    }
}
