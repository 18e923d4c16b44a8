use serde_json::{Value, json};

use crate::adapters::ProviderAdapter;
use crate::prompt::Prompt;
use crate::provider::ProviderKey;

pub struct GeminiAdapter;

impl ProviderAdapter for GeminiAdapter {
    fn key(&self) -> ProviderKey {
        ProviderKey::Gemini
    }

    // Auth rides on the URL, not a header.
    fn endpoint(&self, model: &str, api_key: &str) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent?key={api_key}"
        )
    }

    fn headers(&self, _api_key: &str) -> Vec<(&'static str, String)> {
        vec![("Content-Type", "application/json".to_string())]
    }

    fn body(&self, _model: &str, max_output_tokens: u32, prompt: &Prompt) -> Value {
        json!({
            "contents": [
                {
                    "parts": [
                        {
                            "text": prompt.combined_text(),
                        },
                    ],
                },
            ],
            "generationConfig": {
                "maxOutputTokens": max_output_tokens,
                "temperature": 0.3,
            },
        })
    }

    fn extract_content(&self, response: &Value) -> Option<String> {
        response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
    }
}
