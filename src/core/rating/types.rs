//! Rating Types
//!
//! Pricing configuration and cost breakdown structures. A model's pricing is
//! an ascending-threshold list of tiers; higher tiers specify only the
//! fields that change and inherit the rest from their predecessors (resolved
//! once, see [`tiers`](crate::core::rating::tiers)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::usage::CanonicalUsage;

/// One pricing tier, keyed by the usage threshold at which it activates
///
/// All rates are USD per token (or per unit for `request` / `web_search`).
/// Tier 0 always has `threshold = 0` and backs every category without
/// per-category threshold logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Usage quantity at which this tier becomes applicable
    #[serde(default)]
    pub threshold: u64,
    /// Input rate per token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<f64>,
    /// Output rate per token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<f64>,
    /// Flat rate per request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<f64>,
    /// Flat rate per web-search unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search: Option<f64>,
    /// Reasoning-token rate; falls back to the output rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<f64>,
    /// Cache read/write multipliers over the input rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_multipliers: Option<CacheMultipliers>,
    /// Audio pricing; falls back to text rates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<ModalityPricing>,
    /// Image pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ModalityPricing>,
    /// Video pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<ModalityPricing>,
    /// File/document pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ModalityPricing>,
}

/// Cache billing multipliers applied to the base input rate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheMultipliers {
    /// Multiplier for tokens served from cache (discount)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_input: Option<f64>,
    /// Multiplier for 5-minute cache writes (premium)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_5m: Option<f64>,
    /// Multiplier for 1-hour cache writes (premium)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_1h: Option<f64>,
}

/// Per-modality rates with fallback to the base text rates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalityPricing {
    /// Modality input rate per token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<f64>,
    /// Modality output rate per token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<f64>,
    /// Multiplier for cached modality input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_input_multiplier: Option<f64>,
}

/// Pricing configuration for one (provider, model) pair
///
/// Long-lived, owned by the registry, and only read by the rating core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelProviderConfig {
    /// Provider name (e.g. "anthropic", "vertex")
    pub provider: String,
    /// Provider-scoped model id
    pub model: String,
    /// Ascending-threshold pricing tiers
    #[serde(default)]
    pub pricing: Vec<PricingTier>,
    /// Maximum input tokens, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_tokens: Option<u32>,
    /// Maximum output tokens, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Last pricing update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Cost of one modality's usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalityCost {
    /// Modality input cost
    pub input_cost: f64,
    /// Cached modality input cost
    pub cached_input_cost: f64,
    /// Modality output cost
    pub output_cost: f64,
}

impl ModalityCost {
    /// Sum of the three sub-costs
    pub fn total(&self) -> f64 {
        self.input_cost + self.cached_input_cost + self.output_cost
    }
}

/// Detailed cost breakdown for one request
///
/// Every sub-field is independently auditable; `total_cost` equals the sum
/// of all others unless the usage carried a pass-through cost override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Input cost
    pub input_cost: f64,
    /// Output cost
    pub output_cost: f64,
    /// Cached input cost
    pub cached_input_cost: f64,
    /// 5-minute cache write cost
    pub cache_write_5m_cost: f64,
    /// 1-hour cache write cost
    pub cache_write_1h_cost: f64,
    /// Reasoning token cost
    pub thinking_cost: f64,
    /// Image cost, when image usage is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ModalityCost>,
    /// Audio cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<ModalityCost>,
    /// Video cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<ModalityCost>,
    /// File/document cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ModalityCost>,
    /// Web search cost
    pub web_search_cost: f64,
    /// Flat per-request cost
    pub request_cost: f64,
    /// Total cost
    pub total_cost: f64,
    /// Model the breakdown was priced for
    pub model: String,
    /// Provider the breakdown was priced for
    pub provider: String,
    /// Usage the breakdown was computed from
    pub usage: CanonicalUsage,
}

impl CostBreakdown {
    /// Create an empty breakdown for a (model, provider, usage) triple
    pub fn new(model: String, provider: String, usage: CanonicalUsage) -> Self {
        Self {
            model,
            provider,
            usage,
            ..Default::default()
        }
    }

    /// Exact sum of every cost component, including modality sub-costs
    pub fn component_sum(&self) -> f64 {
        self.input_cost
            + self.output_cost
            + self.cached_input_cost
            + self.cache_write_5m_cost
            + self.cache_write_1h_cost
            + self.thinking_cost
            + self.web_search_cost
            + self.request_cost
            + [&self.image, &self.audio, &self.video, &self.file]
                .iter()
                .filter_map(|modality| modality.as_ref())
                .map(ModalityCost::total)
                .sum::<f64>()
    }
}

/// Cost estimation before making a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Minimum cost (input only)
    pub min_cost: f64,
    /// Maximum cost (input + max output)
    pub max_cost: f64,
    /// Input cost
    pub input_cost: f64,
    /// Estimated output cost
    pub estimated_output_cost: f64,
    /// Currency
    pub currency: String,
}

/// Rating errors
///
/// An unknown pricing target is an explicit error, never a $0 breakdown, so
/// billing can distinguish "unsupported/unpriced" from "free".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    #[error("Model not priced: {model} for provider {provider}")]
    ModelNotPriced { model: String, provider: String },

    #[error("Invalid pricing configuration: {message}")]
    InvalidPricing { message: String },
}
