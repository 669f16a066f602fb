//! Gemini-family usage extraction (Vertex AI / AI Studio)
//!
//! Usage lives under the `usageMetadata` envelope with camelCase counts and
//! per-modality breakdowns. `promptTokenCount` is a superset of cached and
//! modality tokens, so text input is derived by subtraction. The same
//! hosting surface also serves Anthropic models with a different wire
//! format; that delegation happens in the routing table, not here.

use serde_json::Value;

use super::wire::{RawModalityTokenCount, RawUsageMetadata};
use crate::core::usage::types::{CacheDetails, CanonicalUsage, ModalityUsage};

/// Extract canonical usage from a Gemini response body
pub fn extract(body: &Value) -> CanonicalUsage {
    let meta = body
        .get("usageMetadata")
        .or_else(|| body.get("usage"))
        .map(RawUsageMetadata::from_value)
        .unwrap_or_default();
    from_metadata(&meta)
}

fn from_metadata(meta: &RawUsageMetadata) -> CanonicalUsage {
    let prompt = meta.prompt_token_count.unwrap_or(0);
    let candidates = meta.candidates_token_count.unwrap_or(0);
    let cached = meta.cached_content_token_count.unwrap_or(0);
    let thoughts = meta.thoughts_token_count.unwrap_or(0);

    let prompt_modal = ModalityTotals::from_details(meta.prompt_tokens_details.as_deref());
    let out_modal = ModalityTotals::from_details(meta.candidates_tokens_details.as_deref());
    let cache_modal = ModalityTotals::from_details(meta.cache_tokens_details.as_deref());

    let mut usage = CanonicalUsage::new(
        prompt.saturating_sub(cached + prompt_modal.non_text()),
        candidates.saturating_sub(out_modal.non_text()),
    );
    if cached > 0 {
        usage.cache = Some(CacheDetails {
            cached_input: cached.saturating_sub(cache_modal.non_text()),
            ..Default::default()
        });
    }
    if thoughts > 0 {
        usage.thinking = Some(thoughts);
    }

    usage.audio = modality_usage(prompt_modal.audio, cache_modal.audio, out_modal.audio);
    usage.image = modality_usage(prompt_modal.image, cache_modal.image, out_modal.image);
    usage.video = modality_usage(prompt_modal.video, cache_modal.video, out_modal.video);
    usage.file = modality_usage(prompt_modal.document, cache_modal.document, out_modal.document);
    usage
}

fn modality_usage(input: u64, cached_input: u64, output: u64) -> Option<ModalityUsage> {
    let usage = ModalityUsage {
        input,
        cached_input,
        output,
    };
    (!usage.is_empty()).then_some(usage)
}

/// Token totals per non-text modality within one breakdown list
#[derive(Debug, Default)]
struct ModalityTotals {
    audio: u64,
    image: u64,
    video: u64,
    document: u64,
}

impl ModalityTotals {
    fn from_details(details: Option<&[RawModalityTokenCount]>) -> Self {
        let mut totals = Self::default();
        for entry in details.unwrap_or_default() {
            let count = entry.token_count.unwrap_or(0);
            match entry.modality.as_deref() {
                Some("AUDIO") => totals.audio += count,
                Some("IMAGE") => totals.image += count,
                Some("VIDEO") => totals.video += count,
                Some("DOCUMENT") => totals.document += count,
                // TEXT stays in the base counts; unknown labels are ignored.
                _ => {}
            }
        }
        totals
    }

    fn non_text(&self) -> u64 {
        self.audio + self.image + self.video + self.document
    }
}
