//! Anthropic-family usage extraction
//!
//! Native Anthropic responses split cache writes into 5-minute and 1-hour
//! ephemeral buckets, each billed at its own multiplier. Managed hosting
//! surfaces expose the same field names but only a single write bucket,
//! mapped to the 5-minute bucket since that is the only semantic available.

use serde_json::Value;

use super::wire::RawUsage;
use crate::core::usage::types::{CacheDetails, CanonicalUsage};

/// Which cache-write buckets the hosting surface reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheWriteBuckets {
    /// Native API: separate 5-minute and 1-hour ephemeral buckets
    Split,
    /// Managed hosting: one undifferentiated bucket
    Single,
}

/// Extract canonical usage from a native Anthropic response body
pub fn extract(body: &Value) -> CanonicalUsage {
    extract_with(body, CacheWriteBuckets::Split)
}

/// Extract canonical usage from a managed-hosting Anthropic response body
pub fn extract_managed(body: &Value) -> CanonicalUsage {
    extract_with(body, CacheWriteBuckets::Single)
}

fn extract_with(body: &Value, buckets: CacheWriteBuckets) -> CanonicalUsage {
    let raw = match body.get("usage") {
        Some(usage) => RawUsage::from_value(usage),
        // Degenerate shape: token counts at the root, no usage wrapper.
        None => RawUsage::from_value(body),
    };
    from_raw(&raw, buckets)
}

fn from_raw(raw: &RawUsage, buckets: CacheWriteBuckets) -> CanonicalUsage {
    // input_tokens already excludes cache reads and writes on this wire.
    let mut usage = CanonicalUsage::new(
        raw.prompt_tokens.unwrap_or(0),
        raw.completion_tokens.unwrap_or(0),
    );

    let cached_input = raw.cache_read_input_tokens.unwrap_or(0);
    let (write_5m, write_1h) = match buckets {
        CacheWriteBuckets::Split => match &raw.cache_creation {
            Some(creation) => (
                creation.ephemeral_5m_input_tokens.unwrap_or(0),
                creation.ephemeral_1h_input_tokens.unwrap_or(0),
            ),
            // Older responses report only the aggregate; the default
            // cache lifetime is five minutes.
            None => (raw.cache_creation_input_tokens.unwrap_or(0), 0),
        },
        CacheWriteBuckets::Single => (raw.cache_creation_input_tokens.unwrap_or(0), 0),
    };
    let cache = CacheDetails {
        cached_input,
        write_5m,
        write_1h,
    };
    if !cache.is_empty() {
        usage.cache = Some(cache);
    }

    if let Some(searches) = raw
        .server_tool_use
        .as_ref()
        .and_then(|tool_use| tool_use.web_search_requests)
    {
        if searches > 0 {
            usage.web_search = Some(searches);
        }
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_usage_with_split_cache_writes() {
        let usage = extract(&json!({
            "id": "msg_1",
            "model": "claude-sonnet-4",
            "usage": {
                "input_tokens": 1500,
                "output_tokens": 1000,
                "cache_read_input_tokens": 500,
                "cache_creation": {
                    "ephemeral_5m_input_tokens": 100,
                    "ephemeral_1h_input_tokens": 50
                }
            }
        }));
        assert_eq!(usage.input, 1500);
        assert_eq!(usage.output, 1000);
        let cache = usage.cache.unwrap();
        assert_eq!(cache.cached_input, 500);
        assert_eq!(cache.write_5m, 100);
        assert_eq!(cache.write_1h, 50);
    }

    #[test]
    fn test_native_aggregate_write_maps_to_5m() {
        let usage = extract(&json!({
            "usage": {
                "input_tokens": 10,
                "output_tokens": 5,
                "cache_creation_input_tokens": 200
            }
        }));
        assert_eq!(usage.cache.unwrap().write_5m, 200);
    }

    #[test]
    fn test_managed_single_bucket_maps_to_5m() {
        let usage = extract_managed(&json!({
            "usage": {
                "input_tokens": 10,
                "output_tokens": 5,
                "cache_read_input_tokens": 40,
                "cache_creation_input_tokens": 60
            }
        }));
        let cache = usage.cache.unwrap();
        assert_eq!(cache.cached_input, 40);
        assert_eq!(cache.write_5m, 60);
        assert_eq!(cache.write_1h, 0);
    }

    #[test]
    fn test_web_search_requests() {
        let usage = extract(&json!({
            "usage": {
                "input_tokens": 10,
                "output_tokens": 5,
                "server_tool_use": {"web_search_requests": 3}
            }
        }));
        assert_eq!(usage.web_search, Some(3));
    }

    #[test]
    fn test_degenerate_root_level_input_tokens() {
        let usage = extract(&json!({"input_tokens": 77}));
        assert_eq!(usage.input, 77);
        assert_eq!(usage.output, 0);
    }

    #[test]
    fn test_unparseable_yields_zero() {
        assert_eq!(extract(&json!({"error": "overloaded"})), CanonicalUsage::empty());
    }
}
