use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SummaryError};

/// Supported LLM providers. Adding one means implementing a
/// [`crate::adapters::ProviderAdapter`] and registering it; nothing else
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKey {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKey {
    pub const ALL: [ProviderKey; 3] = [ProviderKey::OpenAi, ProviderKey::Anthropic, ProviderKey::Gemini];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKey::OpenAi => "OpenAI",
            ProviderKey::Anthropic => "Anthropic",
            ProviderKey::Gemini => "Gemini",
        }
    }

    pub fn config(&self) -> ProviderConfig {
        match self {
            ProviderKey::OpenAi => ProviderConfig {
                api_key_var: "OPENAI_API_KEY",
                model_var: "OPENAI_MODEL",
                default_model: "gpt-4o",
                max_output_tokens: 4096,
            },
            ProviderKey::Anthropic => ProviderConfig {
                api_key_var: "ANTHROPIC_API_KEY",
                model_var: "ANTHROPIC_MODEL",
                default_model: "claude-sonnet-4-20250514",
                max_output_tokens: 8192,
            },
            ProviderKey::Gemini => ProviderConfig {
                api_key_var: "GEMINI_API_KEY",
                model_var: "GEMINI_MODEL",
                default_model: "gemini-2.5-flash",
                max_output_tokens: 8192,
            },
        }
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static per-provider configuration; effective values come from
/// [`Settings`] at call time.
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfig {
    pub api_key_var: &'static str,
    pub model_var: &'static str,
    pub default_model: &'static str,
    pub max_output_tokens: u32,
}

/// Read-only snapshot of named string settings. Absence and empty values
/// both mean "not configured". Safe to share across concurrent pipelines.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Snapshot every known provider setting from the process environment.
    pub fn from_env() -> Self {
        let mut values = HashMap::new();
        for key in ProviderKey::ALL {
            let config = key.config();
            for var in [config.api_key_var, config.model_var] {
                if let Ok(value) = std::env::var(var) {
                    values.insert(var.to_string(), value);
                }
            }
        }
        Self { values }
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// The provider's API key, or a fatal configuration error naming the
    /// missing setting.
    pub fn api_key(&self, provider: ProviderKey) -> Result<String> {
        let config = provider.config();
        self.get(config.api_key_var)
            .map(str::to_string)
            .ok_or(SummaryError::MissingApiKey {
                setting: config.api_key_var,
            })
    }

    /// The model to request: the configured override, else the default.
    pub fn model_name(&self, provider: ProviderKey) -> String {
        let config = provider.config();
        self.get(config.model_var).unwrap_or(config.default_model).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_table_names_expected_settings() {
        assert_eq!(ProviderKey::Anthropic.config().api_key_var, "ANTHROPIC_API_KEY");
        assert_eq!(ProviderKey::OpenAi.config().api_key_var, "OPENAI_API_KEY");
        assert_eq!(ProviderKey::Gemini.config().api_key_var, "GEMINI_API_KEY");
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let settings = Settings::default();
        let err = settings.api_key(ProviderKey::Anthropic).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
        assert!(err.is_fatal());
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let settings = Settings::default().with("OPENAI_API_KEY", "   ");
        assert!(settings.api_key(ProviderKey::OpenAi).is_err());
    }

    #[test]
    fn model_falls_back_to_default() {
        let settings = Settings::default();
        assert_eq!(settings.model_name(ProviderKey::OpenAi), "gpt-4o");

        let settings = settings.with("OPENAI_MODEL", "gpt-4o-mini");
        assert_eq!(settings.model_name(ProviderKey::OpenAi), "gpt-4o-mini");
    }
}
