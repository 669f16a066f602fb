//! Performance benchmarks for tokenmeter-rs
//!
//! Measures the hot paths of the rating pipeline: stream consolidation,
//! usage extraction, and cost composition.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use tokenmeter_rs::{
    CacheMultipliers, CanonicalUsage, ModelProviderConfig, PricingRegistry, PricingTier,
    ProviderFamily, extract_usage,
};

fn anthropic_stream_capture(frames: usize) -> String {
    let mut raw = String::from(
        "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_1\",\"model\":\"claude-sonnet-4\",\"usage\":{\"input_tokens\":1500,\"output_tokens\":1,\"cache_read_input_tokens\":500}}}\n",
    );
    for _ in 0..frames {
        raw.push_str(
            "data: {\"type\":\"content_block_delta\",\"delta\":{\"type\":\"text_delta\",\"text\":\"chunk\"}}\n",
        );
    }
    raw.push_str("data: {\"type\":\"message_delta\",\"usage\":{\"output_tokens\":1000}}\n");
    raw
}

/// Benchmark stream consolidation plus extraction
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    let buffered = r#"{"model":"gpt-4o","usage":{"prompt_tokens":1000,"completion_tokens":500,"prompt_tokens_details":{"cached_tokens":400}}}"#;
    group.bench_function("openai_buffered", |b| {
        b.iter(|| black_box(extract_usage(ProviderFamily::OpenAi, black_box(buffered), false)));
    });

    for frames in [16, 256].iter() {
        let capture = anthropic_stream_capture(*frames);
        group.throughput(Throughput::Bytes(capture.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("anthropic_stream", frames),
            &capture,
            |b, capture| {
                b.iter(|| black_box(extract_usage(ProviderFamily::Anthropic, capture, true)));
            },
        );
    }
    group.finish();
}

/// Benchmark cost composition through the registry
fn bench_rating(c: &mut Criterion) {
    let registry = PricingRegistry::new();
    registry
        .insert(ModelProviderConfig {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4".to_string(),
            pricing: vec![
                PricingTier {
                    input: Some(3e-6),
                    output: Some(1.5e-5),
                    cache_multipliers: Some(CacheMultipliers {
                        cached_input: Some(0.1),
                        write_5m: Some(1.25),
                        write_1h: Some(2.0),
                    }),
                    ..Default::default()
                },
                PricingTier {
                    threshold: 200_000,
                    input: Some(6e-6),
                    output: Some(2.25e-5),
                    ..Default::default()
                },
            ],
            ..Default::default()
        })
        .unwrap();

    let mut usage = CanonicalUsage::new(1500, 1000);
    usage.cache = Some(tokenmeter_rs::CacheDetails {
        cached_input: 500,
        write_5m: 100,
        write_1h: 50,
    });

    let mut group = c.benchmark_group("rating");
    group.bench_function("compute_cost_cached_tiers", |b| {
        b.iter(|| {
            black_box(
                registry
                    .compute_cost(black_box(&usage), "claude-sonnet-4", "anthropic", None)
                    .unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_extraction, bench_rating);
criterion_main!(benches);
