//! Rating Utilities
//!
//! Presentation helpers. Rounding happens here and only here; the rating
//! path itself never rounds mid-calculation.

/// Format a USD cost for display
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("${:.6}", cost)
    } else if cost < 1.0 {
        format!("${:.4}", cost)
    } else {
        format!("${:.2}", cost)
    }
}

/// Convert a token count to cost at a per-token rate
pub fn tokens_to_cost(tokens: u64, cost_per_token: f64) -> f64 {
    tokens as f64 * cost_per_token
}
