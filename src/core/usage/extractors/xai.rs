//! xAI usage extraction
//!
//! Unlike the shared base, `completion_tokens` on this wire is already
//! effective (reasoning and audio excluded) and is used as-is. Input text
//! tokens come from the `text_tokens` detail when present, and
//! `num_sources_used` maps to the web-search unit count.

use serde_json::Value;

use super::openai;
use crate::core::usage::types::{CacheDetails, CanonicalUsage, ModalityUsage};

/// Extract canonical usage from an xAI response body
pub fn extract(body: &Value) -> CanonicalUsage {
    let raw = openai::raw_usage_of(body);
    let prompt_details = raw.prompt_tokens_details.clone().unwrap_or_default();

    let cached = prompt_details.cached_tokens.unwrap_or(0);
    let prompt_audio = prompt_details.audio_tokens.unwrap_or(0);
    let image_input = prompt_details.image_tokens.unwrap_or(0);
    let input = match prompt_details.text_tokens {
        Some(text) if text > 0 => text,
        _ => raw
            .prompt_tokens
            .unwrap_or(0)
            .saturating_sub(cached + prompt_audio + image_input),
    };

    let mut usage = CanonicalUsage::new(input, raw.completion_tokens.unwrap_or(0));
    if cached > 0 {
        usage.cache = Some(CacheDetails {
            cached_input: cached,
            ..Default::default()
        });
    }
    if let Some(reasoning) = raw
        .completion_tokens_details
        .as_ref()
        .and_then(|details| details.reasoning_tokens)
    {
        if reasoning > 0 {
            usage.thinking = Some(reasoning);
        }
    }
    if prompt_audio > 0 {
        usage.audio = Some(ModalityUsage::input_only(prompt_audio));
    }
    if image_input > 0 {
        usage.image = Some(ModalityUsage::input_only(image_input));
    }
    if let Some(sources) = raw.num_sources_used {
        if sources > 0 {
            usage.web_search = Some(sources);
        }
    }
    usage
}
