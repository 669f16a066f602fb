//! Pricing Tier Resolution
//!
//! Resolves tier-field inheritance once per pricing configuration and
//! selects the applicable tier for a usage quantity. Which quantity is
//! compared against thresholds differs per provider; getting that wrong
//! silently mis-charges by the tier's price delta.

use smallvec::SmallVec;

use crate::core::rating::types::{CacheMultipliers, ModalityPricing, PricingTier};
use crate::core::usage::CanonicalUsage;

/// A pricing configuration with tier inheritance resolved
///
/// Built once per (provider, model) configuration and shared immutably
/// across concurrent rating calls.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPricing {
    tiers: SmallVec<[PricingTier; 2]>,
}

impl ResolvedPricing {
    /// Resolve tier inheritance for an ascending-threshold tier list
    ///
    /// A pure fold: each resolved tier is built from its predecessor's
    /// resolved fields plus its own overrides, so higher tiers can specify
    /// only the fields that change. Nothing is shared or mutated across
    /// tiers. An empty configuration resolves to a single zero-rate tier.
    pub fn resolve(pricing: &[PricingTier]) -> Self {
        let mut tiers: SmallVec<[PricingTier; 2]> = SmallVec::new();
        for tier in pricing {
            let resolved = match tiers.last() {
                Some(prev) => inherit_tier(prev, tier),
                None => tier.clone(),
            };
            tiers.push(resolved);
        }
        if tiers.is_empty() {
            tiers.push(PricingTier::default());
        }
        Self { tiers }
    }

    /// The tier with the highest threshold not exceeding `value`
    ///
    /// Forward scan keeping the highest-index match; tier 0 always matches.
    pub fn tier_for(&self, value: u64) -> &PricingTier {
        let mut selected = &self.tiers[0];
        for tier in &self.tiers {
            if tier.threshold <= value {
                selected = tier;
            }
        }
        selected
    }

    /// Tier 0, the base tier backing every non-tiered category
    pub fn base(&self) -> &PricingTier {
        &self.tiers[0]
    }

    /// Resolved tiers, ascending by threshold
    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }
}

/// Build one resolved tier from its predecessor's fields plus overrides
fn inherit_tier(prev: &PricingTier, tier: &PricingTier) -> PricingTier {
    PricingTier {
        threshold: tier.threshold,
        input: tier.input.or(prev.input),
        output: tier.output.or(prev.output),
        request: tier.request.or(prev.request),
        web_search: tier.web_search.or(prev.web_search),
        thinking: tier.thinking.or(prev.thinking),
        cache_multipliers: inherit_cache_multipliers(
            prev.cache_multipliers.as_ref(),
            tier.cache_multipliers.as_ref(),
        ),
        audio: inherit_modality(prev.audio.as_ref(), tier.audio.as_ref()),
        image: inherit_modality(prev.image.as_ref(), tier.image.as_ref()),
        video: inherit_modality(prev.video.as_ref(), tier.video.as_ref()),
        file: inherit_modality(prev.file.as_ref(), tier.file.as_ref()),
    }
}

fn inherit_cache_multipliers(
    prev: Option<&CacheMultipliers>,
    own: Option<&CacheMultipliers>,
) -> Option<CacheMultipliers> {
    match (prev, own) {
        (None, None) => None,
        (Some(prev), None) => Some(prev.clone()),
        (None, Some(own)) => Some(own.clone()),
        (Some(prev), Some(own)) => Some(CacheMultipliers {
            cached_input: own.cached_input.or(prev.cached_input),
            write_5m: own.write_5m.or(prev.write_5m),
            write_1h: own.write_1h.or(prev.write_1h),
        }),
    }
}

fn inherit_modality(
    prev: Option<&ModalityPricing>,
    own: Option<&ModalityPricing>,
) -> Option<ModalityPricing> {
    match (prev, own) {
        (None, None) => None,
        (Some(prev), None) => Some(prev.clone()),
        (None, Some(own)) => Some(own.clone()),
        (Some(prev), Some(own)) => Some(ModalityPricing {
            input: own.input.or(prev.input),
            output: own.output.or(prev.output),
            cached_input_multiplier: own.cached_input_multiplier.or(prev.cached_input_multiplier),
        }),
    }
}

/// Which usage quantity each cost category's tier lookup is keyed off
///
/// "Price changes at N tokens of context" is a common billing rule, but what
/// counts toward N differs by vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// Always tier 0: flat single-tier pricing
    Flat,
    /// Input/output keyed off input tokens; cached keyed off cached tokens
    Vertex,
    /// All categories keyed off input + cached tokens
    AiStudio,
    /// Input/output keyed off input + all cache categories; cached at tier 0
    Anthropic,
    /// All categories keyed off input + cached tokens
    Xai,
}

/// Comparison quantities for the three tier-selected cost categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdQuantities {
    /// Quantity for the input-cost tier lookup
    pub input: u64,
    /// Quantity for the output-cost tier lookup
    pub output: u64,
    /// Quantity for the cached-input-cost tier lookup
    pub cached: u64,
}

impl ThresholdPolicy {
    /// Policy for a pricing provider name
    pub fn for_provider(provider: &str) -> Self {
        match provider.to_lowercase().as_str() {
            "vertex" | "vertex_ai" | "vertexai" => Self::Vertex,
            "google" | "gemini" | "google_ai_studio" | "ai_studio" => Self::AiStudio,
            "anthropic" | "bedrock" => Self::Anthropic,
            "xai" | "grok" => Self::Xai,
            _ => Self::Flat,
        }
    }

    /// Comparison quantities for a usage record
    pub fn quantities(&self, usage: &CanonicalUsage) -> ThresholdQuantities {
        match self {
            Self::Flat => ThresholdQuantities::default(),
            Self::Vertex => ThresholdQuantities {
                input: usage.input,
                output: usage.input,
                cached: usage.cached_input(),
            },
            Self::AiStudio | Self::Xai => {
                let prompt = usage.input + usage.cached_input();
                ThresholdQuantities {
                    input: prompt,
                    output: prompt,
                    cached: prompt,
                }
            }
            Self::Anthropic => {
                // Tiering depends on total context length including every
                // cache category; the cached rate itself is not tiered.
                let context = usage.input + usage.cache_tokens();
                ThresholdQuantities {
                    input: context,
                    output: context,
                    cached: 0,
                }
            }
        }
    }
}
