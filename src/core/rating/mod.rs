//! Cost Rating
//!
//! Tiered-pricing resolution and cost composition over canonical usage.
//! Pure and synchronous: every call receives its own usage record and
//! pricing snapshot and returns a freshly allocated breakdown.

pub mod calculator;
pub mod tiers;
pub mod types;
pub mod utils;

pub use calculator::{compose_cost, compose_cost_with_policy};
pub use tiers::{ResolvedPricing, ThresholdPolicy, ThresholdQuantities};
pub use types::{
    CacheMultipliers, CostBreakdown, CostEstimate, ModalityCost, ModalityPricing,
    ModelProviderConfig, PricingTier, RatingError,
};
pub use utils::{format_cost, tokens_to_cost};
