//! Canonical Usage Model
//!
//! The provider-agnostic token accounting record that every extractor
//! normalizes raw provider usage into. Token categories are mutually
//! exclusive: no token is ever counted in two buckets.

use serde::{Deserialize, Serialize};

/// Normalized usage for a single request
///
/// A missing field means zero, never unknown. Constructed fresh per request
/// and immutable after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalUsage {
    /// Billable input tokens, exclusive of cached/audio/reasoning counts
    pub input: u64,
    /// Billable output tokens, exclusive of audio/reasoning counts
    pub output: u64,
    /// Cache read/write token buckets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheDetails>,
    /// Reasoning/hidden tokens, billed at a distinct rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<u64>,
    /// Image token usage, independent of the base text counts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ModalityUsage>,
    /// Audio token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<ModalityUsage>,
    /// Video token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<ModalityUsage>,
    /// File/document token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ModalityUsage>,
    /// Server-side web search invocations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search: Option<u64>,
    /// Flat-rate billable request units
    #[serde(default = "default_request_count")]
    pub request_count: u64,
    /// Direct USD cost reported by the provider; replaces the computed total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

fn default_request_count() -> u64 {
    1
}

impl Default for CanonicalUsage {
    fn default() -> Self {
        Self {
            input: 0,
            output: 0,
            cache: None,
            thinking: None,
            image: None,
            audio: None,
            video: None,
            file: None,
            web_search: None,
            request_count: 1,
            cost: None,
        }
    }
}

impl CanonicalUsage {
    /// Create a usage record with base token counts only
    pub fn new(input: u64, output: u64) -> Self {
        Self {
            input,
            output,
            ..Default::default()
        }
    }

    /// Zero usage, the extraction result for unparseable input
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Total cached plus cache-write tokens across all buckets
    pub fn cache_tokens(&self) -> u64 {
        self.cache
            .as_ref()
            .map(|c| c.cached_input + c.write_5m + c.write_1h)
            .unwrap_or(0)
    }

    /// Cached-input (cache read) tokens
    pub fn cached_input(&self) -> u64 {
        self.cache.as_ref().map(|c| c.cached_input).unwrap_or(0)
    }
}

/// Cache token buckets
///
/// Reads and the two ephemeral write buckets are billed at distinct
/// multipliers of the base input rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheDetails {
    /// Tokens served from the provider-side cache
    pub cached_input: u64,
    /// Tokens written to the 5-minute cache bucket
    #[serde(default)]
    pub write_5m: u64,
    /// Tokens written to the 1-hour cache bucket
    #[serde(default)]
    pub write_1h: u64,
}

impl CacheDetails {
    /// True when every bucket is zero
    pub fn is_empty(&self) -> bool {
        self.cached_input == 0 && self.write_5m == 0 && self.write_1h == 0
    }
}

/// Per-modality token usage (image/audio/video/file)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalityUsage {
    /// Modality input tokens
    #[serde(default)]
    pub input: u64,
    /// Modality tokens served from cache
    #[serde(default)]
    pub cached_input: u64,
    /// Modality output tokens
    #[serde(default)]
    pub output: u64,
}

impl ModalityUsage {
    /// Input-only modality usage
    pub fn input_only(input: u64) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// True when every count is zero
    pub fn is_empty(&self) -> bool {
        self.input == 0 && self.cached_input == 0 && self.output == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_request_count_to_one() {
        let usage = CanonicalUsage::new(100, 50);
        assert_eq!(usage.input, 100);
        assert_eq!(usage.output, 50);
        assert_eq!(usage.request_count, 1);
        assert!(usage.cache.is_none());
        assert!(usage.cost.is_none());
    }

    #[test]
    fn test_cache_tokens_sums_all_buckets() {
        let mut usage = CanonicalUsage::new(10, 0);
        usage.cache = Some(CacheDetails {
            cached_input: 500,
            write_5m: 100,
            write_1h: 50,
        });
        assert_eq!(usage.cache_tokens(), 650);
        assert_eq!(usage.cached_input(), 500);
    }

    #[test]
    fn test_empty_usage_is_zero() {
        let usage = CanonicalUsage::empty();
        assert_eq!(usage.input, 0);
        assert_eq!(usage.output, 0);
        assert_eq!(usage.cache_tokens(), 0);
    }

    #[test]
    fn test_request_count_deserialization_default() {
        let usage: CanonicalUsage = serde_json::from_str(r#"{"input":5,"output":3}"#).unwrap();
        assert_eq!(usage.request_count, 1);
    }

    #[test]
    fn test_modality_usage_is_empty() {
        assert!(ModalityUsage::default().is_empty());
        assert!(!ModalityUsage::input_only(1).is_empty());
    }
}
