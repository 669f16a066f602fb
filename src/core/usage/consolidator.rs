//! Stream Consolidator
//!
//! Merges a captured sequence of streamed provider frames into one object
//! shaped like a final, non-streamed response, so extractors never need to
//! know whether a response was streamed. Providers emit a cumulative usage
//! block at stream end; Anthropic splits it across `message_start` and the
//! final `message_delta`, which is why a key-wise merge fallback exists.

use serde_json::{Map, Value, json};
use tracing::debug;

/// Parse an SSE line, stripping the `data: ` prefix
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:"))
}

/// Check if an SSE line is the end-of-stream sentinel
pub fn is_done_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == "data: [DONE]" || trimmed == "[DONE]"
}

/// Consolidate a raw SSE capture into a single final-response-shaped object
///
/// Malformed lines and sentinel markers are skipped, never fatal. Returns an
/// empty-usage object when nothing parseable was found.
pub fn consolidate_stream(raw: &str) -> Value {
    let mut frames = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("event:") || line.starts_with(':') {
            continue;
        }
        if is_done_line(line) {
            continue;
        }
        let payload = parse_sse_line(line).unwrap_or(line);
        match serde_json::from_str::<Value>(payload.trim()) {
            Ok(value) if value.is_object() => frames.push(value),
            Ok(_) => debug!("skipping non-object stream frame"),
            Err(_) => debug!("skipping malformed stream frame"),
        }
    }
    consolidate_frames(&frames)
}

/// Consolidate parsed frames into a single final-response-shaped object
///
/// The last frame carrying a complete usage block wins outright. When the
/// final usage-bearing frame is partial, usage objects are merged key-wise
/// across frames with later frames overwriting the keys they carry.
pub fn consolidate_frames(frames: &[Value]) -> Value {
    let mut id: Option<String> = None;
    let mut model: Option<String> = None;
    let mut merged = Map::new();
    let mut last_usage: Option<Map<String, Value>> = None;

    for frame in frames {
        let Some(obj) = frame.as_object() else {
            continue;
        };
        // Anthropic nests id/model/usage one level down in message_start
        let scopes = [Some(obj), obj.get("message").and_then(Value::as_object)];
        for scope in scopes.into_iter().flatten() {
            if let Some(value) = scope.get("id").and_then(Value::as_str) {
                id = Some(value.to_string());
            }
            if let Some(value) = scope
                .get("model")
                .or_else(|| scope.get("modelVersion"))
                .and_then(Value::as_str)
            {
                model = Some(value.to_string());
            }
            if let Some(usage) = usage_of(scope) {
                for (key, value) in usage {
                    merged.insert(key.clone(), value.clone());
                }
                last_usage = Some(usage.clone());
            }
        }
    }

    let usage = match last_usage {
        Some(usage) if is_complete_usage(&usage) => usage,
        _ => merged,
    };

    let mut out = Map::new();
    if let Some(id) = id {
        out.insert("id".to_string(), Value::String(id));
    }
    if let Some(model) = model {
        out.insert("model".to_string(), Value::String(model));
    }
    out.insert("usage".to_string(), Value::Object(usage));
    Value::Object(out)
}

/// Usage object of a frame scope, unwrapping the Gemini envelope onto the
/// standard `usage` key
fn usage_of(scope: &Map<String, Value>) -> Option<&Map<String, Value>> {
    scope
        .get("usage")
        .or_else(|| scope.get("usageMetadata"))
        .and_then(Value::as_object)
}

/// A usage block is complete when it carries both an input-side and an
/// output-side token count
fn is_complete_usage(usage: &Map<String, Value>) -> bool {
    let input = usage.contains_key("prompt_tokens")
        || usage.contains_key("input_tokens")
        || usage.contains_key("promptTokenCount")
        || usage.contains_key("prompt_cache_miss_tokens");
    let output = usage.contains_key("completion_tokens")
        || usage.contains_key("output_tokens")
        || usage.contains_key("candidatesTokenCount");
    input && output
}

/// Consolidate a buffered body: parse it whole, or fall back to empty usage
pub fn consolidate_buffered(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if value.is_object() => value,
        _ => {
            debug!("unparseable buffered body, treating as empty usage");
            json!({"usage": {}})
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sse_line() {
        assert_eq!(parse_sse_line("data: {\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(parse_sse_line("{\"a\":1}"), None);
    }

    #[test]
    fn test_is_done_line() {
        assert!(is_done_line("data: [DONE]"));
        assert!(is_done_line("[DONE]"));
        assert!(!is_done_line("data: {}"));
    }

    #[test]
    fn test_last_complete_usage_wins() {
        let raw = concat!(
            "data: {\"id\":\"chatcmpl-1\",\"model\":\"gpt-4o\",\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n",
            "data: {\"usage\":{\"prompt_tokens\":5,\"completion_tokens\":1}}\n",
            "data: {\"usage\":{\"prompt_tokens\":100,\"completion_tokens\":42}}\n",
            "data: [DONE]\n",
        );
        let out = consolidate_stream(raw);
        assert_eq!(out["id"], "chatcmpl-1");
        assert_eq!(out["model"], "gpt-4o");
        assert_eq!(out["usage"]["prompt_tokens"], 100);
        assert_eq!(out["usage"]["completion_tokens"], 42);
    }

    #[test]
    fn test_partial_final_frame_merges_with_earlier() {
        // Anthropic shape: message_start carries input and cache counts, the
        // final message_delta carries only the cumulative output count.
        let raw = concat!(
            "event: message_start\n",
            "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_1\",\"model\":\"claude-sonnet-4\",\"usage\":{\"input_tokens\":25,\"output_tokens\":1,\"cache_read_input_tokens\":10}}}\n",
            "event: message_delta\n",
            "data: {\"type\":\"message_delta\",\"usage\":{\"output_tokens\":200}}\n",
        );
        let out = consolidate_stream(raw);
        assert_eq!(out["model"], "claude-sonnet-4");
        assert_eq!(out["usage"]["input_tokens"], 25);
        assert_eq!(out["usage"]["output_tokens"], 200);
        assert_eq!(out["usage"]["cache_read_input_tokens"], 10);
    }

    #[test]
    fn test_gemini_envelope_unwrapped() {
        let raw = concat!(
            "data: {\"candidates\":[],\"modelVersion\":\"gemini-2.0-flash\",\"usageMetadata\":{\"promptTokenCount\":12}}\n",
            "data: {\"candidates\":[],\"usageMetadata\":{\"promptTokenCount\":12,\"candidatesTokenCount\":34}}\n",
        );
        let out = consolidate_stream(raw);
        assert_eq!(out["model"], "gemini-2.0-flash");
        assert_eq!(out["usage"]["promptTokenCount"], 12);
        assert_eq!(out["usage"]["candidatesTokenCount"], 34);
    }

    #[test]
    fn test_malformed_frames_skipped() {
        let raw = "data: not json\ndata: {\"usage\":{\"prompt_tokens\":1,\"completion_tokens\":2}}\n";
        let out = consolidate_stream(raw);
        assert_eq!(out["usage"]["prompt_tokens"], 1);
    }

    #[test]
    fn test_no_parseable_frames_yields_empty_usage() {
        let out = consolidate_stream("data: garbage\n");
        assert!(out["usage"].as_object().unwrap().is_empty());
        let out = consolidate_buffered("also garbage");
        assert!(out["usage"].as_object().unwrap().is_empty());
    }
}
