use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};

use recap_core::{ProviderKey, SummaryStyle};

/// Get the cache directory for a caption document, keyed by content hash
/// so edited caption files are re-processed.
pub fn get_cache_dir(document: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    document.hash(&mut hasher);
    get_root_cache_dir().join(hasher.finish().to_string())
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("recap")
}

/// Get the path for the cached processed transcript
pub fn get_transcript_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("transcript.json")
}

/// Get the path for a cached summary result (provider and style aware)
pub fn get_summary_path(cache_dir: &Path, provider: ProviderKey, style: SummaryStyle) -> PathBuf {
    let provider_name = match provider {
        ProviderKey::OpenAi => "openai",
        ProviderKey::Anthropic => "anthropic",
        ProviderKey::Gemini => "gemini",
    };
    cache_dir.join(format!("summary_{}_{}.json", provider_name, style))
}
