//! Cost Compositor
//!
//! Pure cost composition over canonical usage and resolved pricing tiers.
//! Every component is priced independently and summed into an auditable
//! total; a pass-through cost reported by the provider replaces the total
//! outright, since the provider is authoritative on its own price.

use crate::core::rating::tiers::{ResolvedPricing, ThresholdPolicy};
use crate::core::rating::types::{CostBreakdown, ModalityCost, ModalityPricing, PricingTier};
use crate::core::usage::{CanonicalUsage, ModalityUsage};

/// Compose a cost breakdown for a usage record
///
/// The threshold policy is derived from the pricing provider name; see
/// [`compose_cost_with_policy`] for the explicit form.
pub fn compose_cost(
    model: &str,
    provider: &str,
    usage: &CanonicalUsage,
    pricing: &ResolvedPricing,
) -> CostBreakdown {
    compose_cost_with_policy(
        model,
        provider,
        usage,
        pricing,
        ThresholdPolicy::for_provider(provider),
    )
}

/// Compose a cost breakdown with an explicit threshold policy
pub fn compose_cost_with_policy(
    model: &str,
    provider: &str,
    usage: &CanonicalUsage,
    pricing: &ResolvedPricing,
    policy: ThresholdPolicy,
) -> CostBreakdown {
    let mut breakdown =
        CostBreakdown::new(model.to_string(), provider.to_string(), usage.clone());

    let quantities = policy.quantities(usage);
    let input_tier = pricing.tier_for(quantities.input);
    let output_tier = pricing.tier_for(quantities.output);
    let cached_tier = pricing.tier_for(quantities.cached);
    let base = pricing.base();

    breakdown.input_cost = usage.input as f64 * rate(input_tier.input);
    breakdown.output_cost = usage.output as f64 * rate(output_tier.output);

    if let Some(cache) = &usage.cache {
        let cached_multiplier = cached_tier
            .cache_multipliers
            .as_ref()
            .and_then(|multipliers| multipliers.cached_input)
            .unwrap_or(1.0);
        breakdown.cached_input_cost =
            cache.cached_input as f64 * rate(cached_tier.input) * cached_multiplier;

        // Cache writes are not volume-tiered by any observed provider;
        // always the base rate times the bucket's multiplier.
        let base_rate = rate(base.input);
        let write_multipliers = base.cache_multipliers.as_ref();
        breakdown.cache_write_5m_cost = cache.write_5m as f64
            * base_rate
            * write_multipliers
                .and_then(|multipliers| multipliers.write_5m)
                .unwrap_or(1.0);
        breakdown.cache_write_1h_cost = cache.write_1h as f64
            * base_rate
            * write_multipliers
                .and_then(|multipliers| multipliers.write_1h)
                .unwrap_or(1.0);
    }

    if let Some(thinking) = usage.thinking {
        breakdown.thinking_cost = thinking as f64 * rate(base.thinking.or(base.output));
    }

    breakdown.image = modality_cost(usage.image.as_ref(), base.image.as_ref(), base);
    breakdown.audio = modality_cost(usage.audio.as_ref(), base.audio.as_ref(), base);
    breakdown.video = modality_cost(usage.video.as_ref(), base.video.as_ref(), base);
    breakdown.file = modality_cost(usage.file.as_ref(), base.file.as_ref(), base);

    if let (Some(searches), Some(search_rate)) = (usage.web_search, base.web_search) {
        breakdown.web_search_cost = searches as f64 * search_rate;
    }
    if let Some(request_rate) = base.request {
        if usage.request_count > 0 {
            breakdown.request_cost = usage.request_count as f64 * request_rate;
        }
    }

    breakdown.total_cost = match usage.cost {
        // Pass-through billing: the provider's own price replaces the
        // computed total; token components are kept for audit only.
        Some(cost) => cost,
        None => breakdown.component_sum(),
    };
    breakdown
}

fn rate(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Price one modality's usage with fallback to base text rates
fn modality_cost(
    usage: Option<&ModalityUsage>,
    pricing: Option<&ModalityPricing>,
    base: &PricingTier,
) -> Option<ModalityCost> {
    let usage = usage.filter(|usage| !usage.is_empty())?;
    let input_rate = pricing
        .and_then(|pricing| pricing.input)
        .or(base.input)
        .unwrap_or(0.0);
    let cached_multiplier = pricing
        .and_then(|pricing| pricing.cached_input_multiplier)
        .or_else(|| {
            base.cache_multipliers
                .as_ref()
                .and_then(|multipliers| multipliers.cached_input)
        })
        .unwrap_or(1.0);
    let output_rate = pricing
        .and_then(|pricing| pricing.output)
        .or(base.output)
        .unwrap_or(0.0);
    Some(ModalityCost {
        input_cost: usage.input as f64 * input_rate,
        cached_input_cost: usage.cached_input as f64 * input_rate * cached_multiplier,
        output_cost: usage.output as f64 * output_rate,
    })
}
