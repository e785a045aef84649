//! Throughput benchmarks for the streaming engine

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use cryypt_streamhash::{
    EngineOptions, Hash, InputDescriptor, OutputConfig, OutputFormat, VariantOptions,
};
use futures::stream;
use tokio::runtime::Runtime;

/// Single-update throughput per algorithm and input size
fn benchmark_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_throughput");
    let options = VariantOptions::default()
        .with_kmac_key(InputDescriptor::new("000102030405060708090a0b0c0d0e0f", "HEX"));
    let output = OutputConfig::default().with_output_len(256);

    let sizes = [64usize, 1024, 65536, 1_048_576];
    for size in sizes {
        group.throughput(Throughput::Bytes(size as u64));
        let data = vec![0xa5u8; size];

        for name in ["SHA-256", "SHA3-256", "SHAKE128", "KMAC256"] {
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| {
                    let mut engine =
                        Hash::with_algorithm(name, &options, EngineOptions::default())
                            .expect("engine should build");
                    engine.update(data.as_slice()).expect("update should succeed");
                    let digest = engine
                        .get_hash(OutputFormat::Bytes, &output)
                        .expect("digest should succeed");
                    std::hint::black_box(digest);
                });
            });
        }
    }
    group.finish();
}

/// Cost of splitting the same input into many small updates
fn benchmark_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunked_updates");
    let data = vec![0x3cu8; 65536];
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk in [1usize, 13, 64, 4096] {
        group.bench_with_input(BenchmarkId::new("SHA-256", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut engine = Hash::sha256();
                for piece in data.chunks(chunk) {
                    engine.update(piece).expect("update should succeed");
                }
                std::hint::black_box(
                    engine
                        .get_hash(OutputFormat::Bytes, &OutputConfig::default())
                        .expect("digest should succeed"),
                );
            });
        });
    }
    group.finish();
}

/// HMAC setup and two-pass finalization
fn benchmark_hmac(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac");
    let message = vec![0u8; 1024];

    for key_len in [32usize, 200] {
        let key = vec![0x0bu8; key_len];
        group.bench_with_input(BenchmarkId::new("HMAC-SHA-256", key_len), &key, |b, key| {
            b.iter(|| {
                let mut engine = Hash::sha256();
                engine.set_hmac_key(key.as_slice()).expect("key should be accepted");
                engine.update(message.as_slice()).expect("update should succeed");
                std::hint::black_box(
                    engine
                        .get_hmac(OutputFormat::Bytes, &OutputConfig::default())
                        .expect("hmac should succeed"),
                );
            });
        });
    }
    group.finish();
}

/// Async absorption of a chunked stream
fn benchmark_stream(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime should start");
    let mut group = c.benchmark_group("stream_absorb");
    let chunks: Vec<Vec<u8>> = (0..256).map(|i| vec![i as u8; 4096]).collect();
    group.throughput(Throughput::Bytes(256 * 4096));

    group.bench_function("SHA3-256", |b| {
        b.iter(|| {
            rt.block_on(async {
                let engine =
                    cryypt_streamhash::absorb_stream(Hash::sha3_256(), stream::iter(chunks.clone()))
                        .await
                        .expect("stream should absorb");
                std::hint::black_box(
                    engine
                        .get_hash(OutputFormat::Bytes, &OutputConfig::default())
                        .expect("digest should succeed"),
                );
            });
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_algorithms,
    benchmark_chunking,
    benchmark_hmac,
    benchmark_stream
);
criterion_main!(benches);
