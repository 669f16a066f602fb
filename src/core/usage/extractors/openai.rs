//! OpenAI-family usage extraction
//!
//! The shared base behavior that several provider families delegate to and
//! then adjust. Handles the overlapping token categories of the
//! OpenAI-compatible wire shape: cached, audio, reasoning, image-generation
//! detail, and speculative-decoding prediction counts.

use serde_json::Value;

use super::wire::RawUsage;
use crate::core::usage::types::{CacheDetails, CanonicalUsage, ModalityUsage};

/// Extract canonical usage from an OpenAI-compatible response body
pub fn extract(body: &Value) -> CanonicalUsage {
    from_raw(&raw_usage_of(body))
}

/// Raw usage block of a response body, defaulting when absent or malformed
pub(super) fn raw_usage_of(body: &Value) -> RawUsage {
    body.get("usage")
        .map(RawUsage::from_value)
        .unwrap_or_default()
}

/// Shared base conversion from the raw OpenAI-compatible usage block
pub(super) fn from_raw(raw: &RawUsage) -> CanonicalUsage {
    let prompt = raw.prompt_tokens.unwrap_or(0);
    let completion = raw.completion_tokens.unwrap_or(0);
    let prompt_details = raw.prompt_tokens_details.clone().unwrap_or_default();
    let completion_details = raw.completion_tokens_details.clone().unwrap_or_default();

    let cached = prompt_details.cached_tokens.unwrap_or(0);
    let prompt_audio = prompt_details.audio_tokens.unwrap_or(0);
    let text_tokens = prompt_details.text_tokens.unwrap_or(0);
    let image_input = prompt_details.image_tokens.unwrap_or(0);
    let reasoning = completion_details.reasoning_tokens.unwrap_or(0);
    let completion_audio = completion_details.audio_tokens.unwrap_or(0);

    // A detailed text-token count is authoritative and bypasses the
    // subtraction arithmetic; image-generation prompt_tokens is not a
    // superset of its detail counts the way chat prompts are.
    let input = if text_tokens > 0 {
        text_tokens
    } else {
        prompt.saturating_sub(cached + prompt_audio + image_input)
    };

    let mut output = completion.saturating_sub(completion_audio + reasoning);
    let accepted = completion_details.accepted_prediction_tokens;
    let rejected = completion_details.rejected_prediction_tokens;
    if accepted.is_some() || rejected.is_some() {
        // Accepted prediction tokens are billable output; rejected ones are
        // dropped from the billable count.
        let accepted = accepted.unwrap_or(0);
        output = output
            .saturating_sub(accepted + rejected.unwrap_or(0))
            .saturating_add(accepted);
    }

    let mut usage = CanonicalUsage::new(input, output);
    if cached > 0 {
        usage.cache = Some(CacheDetails {
            cached_input: cached,
            ..Default::default()
        });
    }
    if reasoning > 0 {
        usage.thinking = Some(reasoning);
    }
    // The legacy shape reports no input/output split for audio.
    let audio_total = prompt_audio + completion_audio;
    if audio_total > 0 {
        usage.audio = Some(ModalityUsage::input_only(audio_total));
    }
    if image_input > 0 {
        usage.image = Some(ModalityUsage::input_only(image_input));
    }
    usage
}
