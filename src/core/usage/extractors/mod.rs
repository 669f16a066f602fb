//! Usage Extractors
//!
//! One extraction strategy per provider family, each converting a raw
//! (possibly streamed) response body into the canonical usage model.
//! Extraction is total: unparseable or absent input yields zero usage,
//! never an error. Shared OpenAI-family logic lives in one reusable
//! function that family-specific variants call and then adjust.

pub mod anthropic;
pub mod deepseek;
pub mod google;
pub mod openai;
pub mod openrouter;
pub mod wire;
pub mod xai;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub use openrouter::ExtractorConfig;

use crate::core::usage::consolidator::{consolidate_buffered, consolidate_stream};
use crate::core::usage::types::CanonicalUsage;

/// Provider families with distinct usage wire formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    /// OpenAI-compatible usage shape (shared base behavior)
    OpenAi,
    /// Native Anthropic API
    Anthropic,
    /// Anthropic on managed hosting surfaces (single cache-write bucket)
    AnthropicManaged,
    /// Gemini on Vertex AI or AI Studio
    Google,
    /// DeepSeek
    DeepSeek,
    /// xAI
    Xai,
    /// Pass-through aggregator (OpenRouter-style)
    OpenRouter,
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::AnthropicManaged => "anthropic_managed",
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
            Self::Xai => "xai",
            Self::OpenRouter => "openrouter",
        };
        write!(f, "{}", name)
    }
}

/// One model-id delegation rule
struct RouteRule {
    family: ProviderFamily,
    pattern: Regex,
    target: ProviderFamily,
}

/// Model-id routing table
///
/// A hosting surface can serve model families with unrelated wire formats;
/// the table makes that delegation explicit and testable instead of a
/// string-matching conditional inside one extractor.
static ROUTES: Lazy<Vec<RouteRule>> = Lazy::new(|| {
    vec![RouteRule {
        family: ProviderFamily::Google,
        pattern: Regex::new("(?i)claude").expect("static route pattern"),
        target: ProviderFamily::AnthropicManaged,
    }]
});

/// Resolve the effective extractor family for a model id
pub fn route(family: ProviderFamily, model_id: &str) -> ProviderFamily {
    for rule in ROUTES.iter() {
        if rule.family == family && rule.pattern.is_match(model_id) {
            return rule.target;
        }
    }
    family
}

/// Extract canonical usage from a raw response body
///
/// Never fails; the worst case is zero usage.
pub fn extract_usage(family: ProviderFamily, raw_body: &str, is_stream: bool) -> CanonicalUsage {
    extract_usage_with(family, raw_body, is_stream, &ExtractorConfig::default())
}

/// Extract canonical usage with explicit extractor configuration
pub fn extract_usage_with(
    family: ProviderFamily,
    raw_body: &str,
    is_stream: bool,
    config: &ExtractorConfig,
) -> CanonicalUsage {
    let body = if is_stream {
        consolidate_stream(raw_body)
    } else {
        consolidate_buffered(raw_body)
    };
    extract_value(family, &body, config)
}

/// Extract canonical usage from an already-consolidated body
pub fn extract_value(
    family: ProviderFamily,
    body: &Value,
    config: &ExtractorConfig,
) -> CanonicalUsage {
    let model = body
        .get("model")
        .or_else(|| body.get("modelVersion"))
        .and_then(Value::as_str)
        .unwrap_or("");
    match route(family, model) {
        ProviderFamily::OpenAi => openai::extract(body),
        ProviderFamily::Anthropic => anthropic::extract(body),
        ProviderFamily::AnthropicManaged => anthropic::extract_managed(body),
        ProviderFamily::Google => google::extract(body),
        ProviderFamily::DeepSeek => deepseek::extract(body),
        ProviderFamily::Xai => xai::extract(body),
        ProviderFamily::OpenRouter => openrouter::extract(body, config),
    }
}
