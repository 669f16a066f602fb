//! # TokenMeter-RS
//!
//! A usage-normalization and cost-rating engine for LLM provider responses.
//! Ingests raw, heterogeneous provider API responses (streamed or buffered)
//! and produces an exact monetary cost breakdown across provider families
//! with incompatible wire formats, graduated (tiered) pricing, cache-discount
//! multipliers, and per-modality rates.
//!
//! ## Features
//!
//! - **Canonical Usage Model**: every provider's token accounting normalized
//!   into one mutually-exclusive shape (no token counted twice)
//! - **Per-Provider Extractors**: OpenAI-compatible, Anthropic (native and
//!   managed hosting), Gemini, DeepSeek, xAI, and pass-through aggregators
//! - **Stream Consolidation**: captured SSE streams merged into one logical
//!   final payload before extraction
//! - **Tiered Pricing**: ascending-threshold tiers with field inheritance and
//!   provider-specific threshold selection
//! - **Auditable Breakdowns**: every cost component independently inspectable,
//!   totals exact to fractions of a cent
//!
//! ## Quick Start
//!
//! ```rust
//! use tokenmeter_rs::{
//!     CanonicalUsage, ModelProviderConfig, PricingRegistry, PricingTier, ProviderFamily,
//!     extract_usage,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Normalize a raw provider response body.
//!     let body = r#"{"model":"gpt-4o","usage":{"prompt_tokens":1000,"completion_tokens":500}}"#;
//!     let usage = extract_usage(ProviderFamily::OpenAi, body, false);
//!     assert_eq!(usage.input, 1000);
//!
//!     // Rate it against registered pricing.
//!     let registry = PricingRegistry::new();
//!     registry.insert(ModelProviderConfig {
//!         provider: "openai".to_string(),
//!         model: "gpt-4o".to_string(),
//!         pricing: vec![PricingTier {
//!             input: Some(2.5e-6),
//!             output: Some(1e-5),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     })?;
//!     let breakdown = registry.compute_cost(&usage, "gpt-4o", "openai", None)?;
//!     println!("total: {}", breakdown.total_cost);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod core;
pub mod services;

// Re-export main types
pub use crate::core::rating::{
    CacheMultipliers, CostBreakdown, CostEstimate, ModalityCost, ModalityPricing,
    ModelProviderConfig, PricingTier, RatingError, ResolvedPricing, ThresholdPolicy,
    compose_cost, compose_cost_with_policy, format_cost,
};
pub use crate::core::usage::{
    CacheDetails, CanonicalUsage, ExtractorConfig, ModalityUsage, ProviderFamily,
    consolidate_frames, consolidate_stream, extract_usage, extract_usage_with, extract_value,
};
pub use crate::services::registry::PricingRegistry;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
