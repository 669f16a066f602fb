//! Usage Normalization
//!
//! Converts raw, heterogeneous provider response bodies (buffered or
//! captured SSE streams) into the canonical usage model that the rating
//! side prices. Provider wire formats disagree about which token
//! categories overlap; the extractors exist to make the canonical counts
//! mutually exclusive.

pub mod consolidator;
pub mod extractors;
pub mod types;

pub use consolidator::{consolidate_buffered, consolidate_frames, consolidate_stream};
pub use extractors::{
    ExtractorConfig, ProviderFamily, extract_usage, extract_usage_with, extract_value, route,
};
pub use types::{CacheDetails, CanonicalUsage, ModalityUsage};
