//! Pass-through aggregator usage extraction (OpenRouter-style)
//!
//! Token accounting follows the shared OpenAI-family base; in addition the
//! aggregator may report a direct USD cost or an upstream cost split. That
//! value is surfaced via `CanonicalUsage::cost` and takes priority over
//! computed tiered pricing. A markup multiplier applies only when the call
//! was billed through managed pass-through billing; BYOK calls carry the
//! upstream provider's own cost and are passed through unchanged.

use serde_json::Value;

use super::openai;
use crate::core::usage::types::CanonicalUsage;

/// Extractor tunables
///
/// The only knob this core exposes: the pass-through billing markup applied
/// to aggregator-reported costs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractorConfig {
    /// Multiplier for managed pass-through billing (1.0 = no markup)
    pub passthrough_markup: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            passthrough_markup: 1.0,
        }
    }
}

/// Extract canonical usage from an aggregator response body
pub fn extract(body: &Value, config: &ExtractorConfig) -> CanonicalUsage {
    let mut usage = openai::extract(body);
    let raw = openai::raw_usage_of(body);

    let upstream = raw.cost_details.as_ref().and_then(|details| {
        details.upstream_inference_cost.or_else(|| {
            match (
                details.upstream_inference_prompt_cost,
                details.upstream_inference_completions_cost,
            ) {
                (None, None) => None,
                (prompt, completion) => Some(prompt.unwrap_or(0.0) + completion.unwrap_or(0.0)),
            }
        })
    });

    usage.cost = match (upstream, raw.cost) {
        // BYOK: the upstream provider's own price, no markup.
        (Some(upstream), _) => Some(upstream),
        (None, Some(cost)) if raw.is_byok == Some(true) => Some(cost),
        (None, Some(cost)) => Some(cost * config.passthrough_markup),
        (None, None) => None,
    };
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_managed_cost_with_markup() {
        let config = ExtractorConfig {
            passthrough_markup: 1.055,
        };
        let usage = extract(
            &json!({
                "usage": {"prompt_tokens": 100, "completion_tokens": 50, "cost": 0.02}
            }),
            &config,
        );
        assert_eq!(usage.input, 100);
        assert_eq!(usage.output, 50);
        assert!((usage.cost.unwrap() - 0.0211).abs() < 1e-12);
    }

    #[test]
    fn test_upstream_split_preferred_without_markup() {
        let config = ExtractorConfig {
            passthrough_markup: 1.5,
        };
        let usage = extract(
            &json!({
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 5,
                    "cost": 0.5,
                    "cost_details": {"upstream_inference_cost": 0.3}
                }
            }),
            &config,
        );
        assert_eq!(usage.cost, Some(0.3));
    }

    #[test]
    fn test_upstream_prompt_completion_split_summed() {
        let usage = extract(
            &json!({
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 5,
                    "cost_details": {
                        "upstream_inference_prompt_cost": 0.01,
                        "upstream_inference_completions_cost": 0.02
                    }
                }
            }),
            &ExtractorConfig::default(),
        );
        assert!((usage.cost.unwrap() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_byok_cost_not_marked_up() {
        let config = ExtractorConfig {
            passthrough_markup: 2.0,
        };
        let usage = extract(
            &json!({
                "usage": {"prompt_tokens": 1, "completion_tokens": 1, "cost": 0.1, "is_byok": true}
            }),
            &config,
        );
        assert_eq!(usage.cost, Some(0.1));
    }

    #[test]
    fn test_no_cost_reported() {
        let usage = extract(
            &json!({"usage": {"prompt_tokens": 7, "completion_tokens": 3}}),
            &ExtractorConfig::default(),
        );
        assert!(usage.cost.is_none());
    }
}
