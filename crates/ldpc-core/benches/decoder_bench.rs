//! Benchmarks for LDPC encode and decode throughput.
//!
//! Run with: cargo bench -p ldpc-core --bench decoder_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ldpc_core::{Decoder, DecoderConfig, LdpcCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn build_code(r: usize, n: usize, seed: u64) -> LdpcCode {
    let mut code = LdpcCode::new();
    let mut rng = StdRng::seed_from_u64(seed);
    code.random_with_rng(r, n, &vec![6; r], &vec![3; n], &mut rng)
        .unwrap();
    code.create_encoder().unwrap();
    code
}

fn noisy_llrs(code: &LdpcCode, seed: u64) -> Vec<f64> {
    let (_, k, _) = code.dimensions();
    let mut rng = StdRng::seed_from_u64(seed);
    let info: Vec<u8> = (0..k).map(|_| rng.gen_range(0..2u8)).collect();
    let cw = code.encode(&info).unwrap();
    cw.iter()
        .map(|&b| {
            let sign = if b == 1 { -1.0 } else { 1.0 };
            sign * rng.gen_range(0.5..4.0)
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for &n in &[256usize, 1024] {
        let code = build_code(n / 2, n, 7);
        let (_, k, _) = code.dimensions();
        let info: Vec<u8> = (0..k).map(|i| (i % 2) as u8).collect();
        group.throughput(Throughput::Elements(k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| code.encode(black_box(&info)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &n in &[256usize, 1024] {
        let code = build_code(n / 2, n, 7);
        let llr = noisy_llrs(&code, 8);

        let mut sum_product = Decoder::new(DecoderConfig::default());
        group.bench_with_input(BenchmarkId::new("sum_product", n), &n, |b, _| {
            b.iter(|| sum_product.decode(&code, black_box(&llr), 20).unwrap())
        });

        let mut min_sum = Decoder::new(DecoderConfig::min_sum());
        group.bench_with_input(BenchmarkId::new("min_sum", n), &n, |b, _| {
            b.iter(|| min_sum.decode(&code, black_box(&llr), 20).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
