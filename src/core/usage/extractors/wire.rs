//! Raw wire-format usage types
//!
//! Permissive structural records for provider usage payloads. Everything is
//! optional and unknown keys are ignored; extractors convert these into the
//! strict [`CanonicalUsage`](crate::core::usage::CanonicalUsage) immediately,
//! so loosely-typed JSON never leaks past the extractor boundary.

use serde::Deserialize;
use serde_json::Value;

/// Raw usage block as emitted by OpenAI-compatible and Anthropic-style APIs
///
/// Field aliases cover wire synonyms: Anthropic reports
/// `input_tokens`/`output_tokens`, image-generation endpoints report
/// `input_tokens_details`, both parse into the same record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUsage {
    /// Prompt-side token count
    #[serde(default, alias = "input_tokens")]
    pub prompt_tokens: Option<u64>,
    /// Completion-side token count
    #[serde(default, alias = "output_tokens")]
    pub completion_tokens: Option<u64>,
    /// Prompt-side detail breakdown
    #[serde(default, alias = "input_tokens_details")]
    pub prompt_tokens_details: Option<RawPromptTokensDetails>,
    /// Completion-side detail breakdown
    #[serde(default, alias = "output_tokens_details")]
    pub completion_tokens_details: Option<RawCompletionTokensDetails>,
    /// Anthropic cache read tokens
    #[serde(default)]
    pub cache_read_input_tokens: Option<u64>,
    /// Anthropic single-bucket cache write tokens (managed hosting surfaces)
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u64>,
    /// Anthropic split cache write buckets
    #[serde(default)]
    pub cache_creation: Option<RawCacheCreation>,
    /// Anthropic server-initiated tool accounting
    #[serde(default)]
    pub server_tool_use: Option<RawServerToolUse>,
    /// DeepSeek cache hit tokens (the cached-input bucket)
    #[serde(default)]
    pub prompt_cache_hit_tokens: Option<u64>,
    /// DeepSeek cache miss tokens (the billable input)
    #[serde(default)]
    pub prompt_cache_miss_tokens: Option<u64>,
    /// xAI web-search source count
    #[serde(default)]
    pub num_sources_used: Option<u64>,
    /// Aggregator-reported USD cost
    #[serde(default)]
    pub cost: Option<f64>,
    /// Aggregator upstream cost splits
    #[serde(default)]
    pub cost_details: Option<RawCostDetails>,
    /// Aggregator bring-your-own-key billing marker
    #[serde(default)]
    pub is_byok: Option<bool>,
}

impl RawUsage {
    /// Parse a raw usage value; structurally unexpected input yields defaults
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// Prompt token details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPromptTokensDetails {
    /// Cached tokens
    #[serde(default)]
    pub cached_tokens: Option<u64>,
    /// Audio tokens
    #[serde(default)]
    pub audio_tokens: Option<u64>,
    /// Text tokens (image-generation models)
    #[serde(default)]
    pub text_tokens: Option<u64>,
    /// Image tokens (image-generation models)
    #[serde(default)]
    pub image_tokens: Option<u64>,
}

/// Completion token details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompletionTokensDetails {
    /// Reasoning tokens
    #[serde(default)]
    pub reasoning_tokens: Option<u64>,
    /// Audio tokens
    #[serde(default)]
    pub audio_tokens: Option<u64>,
    /// Speculative-decoding accepted prediction tokens
    #[serde(default)]
    pub accepted_prediction_tokens: Option<u64>,
    /// Speculative-decoding rejected prediction tokens
    #[serde(default)]
    pub rejected_prediction_tokens: Option<u64>,
}

/// Anthropic split cache-write accounting
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCacheCreation {
    /// Tokens written to the 5-minute ephemeral cache
    #[serde(default)]
    pub ephemeral_5m_input_tokens: Option<u64>,
    /// Tokens written to the 1-hour ephemeral cache
    #[serde(default)]
    pub ephemeral_1h_input_tokens: Option<u64>,
}

/// Anthropic server-initiated tool usage
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawServerToolUse {
    /// Web search request count
    #[serde(default)]
    pub web_search_requests: Option<u64>,
}

/// Aggregator upstream cost detail
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCostDetails {
    /// Total upstream inference cost in USD
    #[serde(default)]
    pub upstream_inference_cost: Option<f64>,
    /// Upstream prompt-side cost split
    #[serde(default)]
    pub upstream_inference_prompt_cost: Option<f64>,
    /// Upstream completion-side cost split
    #[serde(default)]
    pub upstream_inference_completions_cost: Option<f64>,
}

/// Gemini usage metadata envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUsageMetadata {
    /// Prompt token count, inclusive of cached and modality tokens
    #[serde(default)]
    pub prompt_token_count: Option<u64>,
    /// Candidate (output) token count
    #[serde(default)]
    pub candidates_token_count: Option<u64>,
    /// Reasoning token count
    #[serde(default)]
    pub thoughts_token_count: Option<u64>,
    /// Tokens served from cached content
    #[serde(default)]
    pub cached_content_token_count: Option<u64>,
    /// Per-modality prompt breakdown
    #[serde(default)]
    pub prompt_tokens_details: Option<Vec<RawModalityTokenCount>>,
    /// Per-modality candidate breakdown
    #[serde(default)]
    pub candidates_tokens_details: Option<Vec<RawModalityTokenCount>>,
    /// Per-modality cached-content breakdown
    #[serde(default)]
    pub cache_tokens_details: Option<Vec<RawModalityTokenCount>>,
}

impl RawUsageMetadata {
    /// Parse a raw metadata value; structurally unexpected input yields defaults
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// One modality entry in a Gemini token breakdown
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModalityTokenCount {
    /// Modality label (TEXT, AUDIO, IMAGE, VIDEO, DOCUMENT)
    #[serde(default)]
    pub modality: Option<String>,
    /// Token count for the modality
    #[serde(default)]
    pub token_count: Option<u64>,
}
