//! Pricing Registry
//!
//! Read-mostly (provider, model) → pricing-configuration store consumed by
//! the rating core, with an idempotent resolved-tier cache so tier
//! inheritance is computed once per configuration and shared immutably
//! across concurrent rating calls. Population (JSON load / insert) is
//! provided for callers and tests; refreshing from a network source is the
//! caller's concern.

use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::rating::calculator::compose_cost;
use crate::core::rating::tiers::ResolvedPricing;
use crate::core::rating::types::{
    CostBreakdown, CostEstimate, ModelProviderConfig, RatingError,
};
use crate::core::usage::CanonicalUsage;

/// Registry key: lowercased provider name plus provider-scoped model id
type RegistryKey = (String, String);

fn registry_key(model: &str, provider: &str) -> RegistryKey {
    (provider.to_lowercase(), model.to_string())
}

/// In-memory pricing registry
#[derive(Debug, Default)]
pub struct PricingRegistry {
    /// Pricing configurations keyed by (provider, model)
    models: RwLock<HashMap<RegistryKey, Arc<ModelProviderConfig>>>,
    /// Resolved tier-inheritance cache, populated compute-if-absent
    resolved: DashMap<RegistryKey, Arc<ResolvedPricing>>,
}

impl PricingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one pricing configuration
    ///
    /// Rejects configurations whose tiers are not ascending by threshold or
    /// whose first tier does not start at zero.
    pub fn insert(&self, config: ModelProviderConfig) -> Result<(), RatingError> {
        validate_pricing(&config)?;
        let key = registry_key(&config.model, &config.provider);
        debug!(provider = %config.provider, model = %config.model, "registering pricing");
        self.models.write().insert(key.clone(), Arc::new(config));
        // Stale resolved tiers must not outlive the configuration.
        self.resolved.remove(&key);
        Ok(())
    }

    /// Load pricing configurations from a JSON document (array of configs)
    ///
    /// Returns the number of configurations loaded.
    pub fn load_json_str(&self, json: &str) -> Result<usize, RatingError> {
        let configs: Vec<ModelProviderConfig> =
            serde_json::from_str(json).map_err(|err| RatingError::InvalidPricing {
                message: format!("malformed pricing document: {}", err),
            })?;
        let count = configs.len();
        for config in configs {
            self.insert(config)?;
        }
        info!(count, "pricing registry loaded");
        Ok(count)
    }

    /// Look up the pricing configuration for a (provider, model) pair
    pub fn lookup(&self, model: &str, provider: &str) -> Option<Arc<ModelProviderConfig>> {
        self.models
            .read()
            .get(&registry_key(model, provider))
            .cloned()
    }

    /// Resolved pricing tiers for a (provider, model) pair
    ///
    /// Computed once per configuration via compute-if-absent; the resolution
    /// is idempotent, so a racing double-compute is harmless.
    pub fn resolved_pricing(&self, model: &str, provider: &str) -> Option<Arc<ResolvedPricing>> {
        let key = registry_key(model, provider);
        if let Some(resolved) = self.resolved.get(&key) {
            return Some(Arc::clone(&resolved));
        }
        let config = self.lookup(model, provider)?;
        let resolved = self
            .resolved
            .entry(key)
            .or_insert_with(|| Arc::new(ResolvedPricing::resolve(&config.pricing)));
        Some(Arc::clone(&resolved))
    }

    /// Compute the cost breakdown for a usage record
    ///
    /// An unknown (provider, model) pair is an explicit error so billing can
    /// flag the gap rather than silently charging $0. `request_count`
    /// overrides the usage's own count when given.
    pub fn compute_cost(
        &self,
        usage: &CanonicalUsage,
        model: &str,
        provider: &str,
        request_count: Option<u64>,
    ) -> Result<CostBreakdown, RatingError> {
        let pricing = self.resolved_pricing(model, provider).ok_or_else(|| {
            warn!(%model, %provider, "no pricing configuration for model");
            RatingError::ModelNotPriced {
                model: model.to_string(),
                provider: provider.to_string(),
            }
        })?;
        let usage = match request_count {
            Some(count) => {
                let mut usage = usage.clone();
                usage.request_count = count;
                usage
            }
            None => usage.clone(),
        };
        Ok(compose_cost(model, provider, &usage, &pricing))
    }

    /// Estimate cost before making a request
    pub fn estimate_cost(
        &self,
        model: &str,
        provider: &str,
        input_tokens: u64,
        max_output_tokens: Option<u64>,
    ) -> Result<CostEstimate, RatingError> {
        let pricing =
            self.resolved_pricing(model, provider)
                .ok_or_else(|| RatingError::ModelNotPriced {
                    model: model.to_string(),
                    provider: provider.to_string(),
                })?;
        let tier = pricing.tier_for(input_tokens);
        let input_cost = input_tokens as f64 * tier.input.unwrap_or(0.0);
        let estimated_output_tokens = max_output_tokens.unwrap_or(100);
        let estimated_output_cost =
            estimated_output_tokens as f64 * tier.output.unwrap_or(0.0);
        Ok(CostEstimate {
            min_cost: input_cost,
            max_cost: input_cost + estimated_output_cost,
            input_cost,
            estimated_output_cost,
            currency: "USD".to_string(),
        })
    }

    /// Number of registered configurations
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    /// True when no configurations are registered
    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// All model ids registered for a provider
    pub fn models_for_provider(&self, provider: &str) -> Vec<String> {
        let provider = provider.to_lowercase();
        let mut models: Vec<String> = self
            .models
            .read()
            .keys()
            .filter(|(key_provider, _)| *key_provider == provider)
            .map(|(_, model)| model.clone())
            .collect();
        models.sort();
        models
    }
}

/// Validate tier ordering for a configuration
fn validate_pricing(config: &ModelProviderConfig) -> Result<(), RatingError> {
    if let Some(first) = config.pricing.first() {
        if first.threshold != 0 {
            return Err(RatingError::InvalidPricing {
                message: format!(
                    "{}/{}: first tier must start at threshold 0",
                    config.provider, config.model
                ),
            });
        }
    }
    for pair in config.pricing.windows(2) {
        if pair[1].threshold < pair[0].threshold {
            return Err(RatingError::InvalidPricing {
                message: format!(
                    "{}/{}: tiers must be ascending by threshold",
                    config.provider, config.model
                ),
            });
        }
    }
    Ok(())
}
