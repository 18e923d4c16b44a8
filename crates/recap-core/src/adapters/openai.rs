use serde_json::{Value, json};

use crate::adapters::ProviderAdapter;
use crate::prompt::Prompt;
use crate::provider::ProviderKey;

pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn key(&self) -> ProviderKey {
        ProviderKey::OpenAi
    }

    fn endpoint(&self, _model: &str, _api_key: &str) -> String {
        "https://api.openai.com/v1/chat/completions".to_string()
    }

    fn headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", format!("Bearer {api_key}")),
            ("Content-Type", "application/json".to_string()),
        ]
    }

    fn body(&self, model: &str, max_output_tokens: u32, prompt: &Prompt) -> Value {
        json!({
            "model": model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt.combined_text(),
                },
            ],
            "max_tokens": max_output_tokens,
            "temperature": 0.3,
        })
    }

    fn extract_content(&self, response: &Value) -> Option<String> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
    }
}
