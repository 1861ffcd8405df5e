//! Benchmarks for request translation.
//!
//! Run with: cargo bench --bench transformer_bench

use chat_relay_proxy::services::ProviderKind;
use chat_relay_proxy::transformer::{translate_chat_body, translate_chat_request};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

fn bench_translate_minimal(c: &mut Criterion) {
    let defaults = &ProviderKind::DeepSeek.profile().defaults;
    let request = json!({
        "messages": [{"role": "user", "content": "hi"}]
    });

    c.bench_function("translate_minimal", |b| {
        b.iter(|| translate_chat_request(black_box(&request), defaults))
    });
}

fn bench_translate_with_extras(c: &mut Criterion) {
    let defaults = &ProviderKind::Nim.profile().defaults;
    let request = json!({
        "model": "meta/llama-3.1-70b-instruct",
        "messages": [
            {"role": "system", "content": "You are a helpful assistant."},
            {"role": "user", "content": "Hello, how are you?"}
        ],
        "temperature": 0.2,
        "stream": true,
        "tools": [{"type": "function", "function": {"name": "lookup", "parameters": {}}}],
        "user": "bench",
        "logprobs": true
    });

    c.bench_function("translate_with_extras", |b| {
        b.iter(|| translate_chat_request(black_box(&request), defaults))
    });
}

fn bench_translate_body_by_history(c: &mut Criterion) {
    let defaults = &ProviderKind::DeepSeek.profile().defaults;
    let mut group = c.benchmark_group("translate_body_history");

    for turns in [1usize, 16, 128] {
        let messages: Vec<_> = (0..turns)
            .map(|i| json!({"role": if i % 2 == 0 { "user" } else { "assistant" }, "content": "x".repeat(200)}))
            .collect();
        let raw = serde_json::to_vec(&json!({"messages": messages, "stream": false})).unwrap();

        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(turns), &raw, |b, raw| {
            b.iter(|| translate_chat_body(black_box(raw), defaults))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_translate_minimal,
    bench_translate_with_extras,
    bench_translate_body_by_history
);
criterion_main!(benches);
