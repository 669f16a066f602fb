//! DeepSeek usage extraction
//!
//! DeepSeek reports `prompt_cache_hit_tokens` / `prompt_cache_miss_tokens`
//! instead of a single prompt count: the miss count is the billable input
//! and the hit count is the cached bucket. `completion_tokens` already
//! includes reasoning tokens and must have them subtracted.

use serde_json::Value;

use super::openai;
use crate::core::usage::types::{CacheDetails, CanonicalUsage};

/// Extract canonical usage from a DeepSeek response body
pub fn extract(body: &Value) -> CanonicalUsage {
    let raw = openai::raw_usage_of(body);

    let hit = raw.prompt_cache_hit_tokens.unwrap_or(0);
    let input = match raw.prompt_cache_miss_tokens {
        Some(miss) => miss,
        None => raw.prompt_tokens.unwrap_or(0).saturating_sub(hit),
    };

    let completion = raw.completion_tokens.unwrap_or(0);
    let reasoning = raw
        .completion_tokens_details
        .as_ref()
        .and_then(|details| details.reasoning_tokens)
        .unwrap_or(0);

    let mut usage = CanonicalUsage::new(input, completion.saturating_sub(reasoning));
    if hit > 0 {
        usage.cache = Some(CacheDetails {
            cached_input: hit,
            ..Default::default()
        });
    }
    if reasoning > 0 {
        usage.thinking = Some(reasoning);
    }
    usage
}
