//! Parser throughput benchmarks.
//!
//! Run with: `cargo bench --package flc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flc_lex::{scan, strip_whitespace};
use flc_par::{parse_file, parse_postorder};
use flc_tok::TokensStore;

fn make_store(input: &str) -> TokensStore<'_> {
    TokensStore::build(input.as_bytes(), strip_whitespace(scan(input.as_bytes())))
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let small = "def Main(): { return 2 + 3 * 4; };";
    let store = make_store(small);
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("ast_small_function", |b| b.iter(|| parse_file(black_box(&store)).unwrap()));
    group.bench_function("postorder_small_function", |b| b.iter(|| parse_postorder(black_box(&store)).unwrap()));

    let large: String = (0..200)
        .map(|i| format!("def Fn{i}(a, b): {{ let t = a + b * {i}; return t - 1; }};\n"))
        .collect();
    let large_store = make_store(&large);
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("ast_many_functions", |b| b.iter(|| parse_file(black_box(&large_store)).unwrap()));
    group.bench_function("postorder_many_functions", |b| b.iter(|| parse_postorder(black_box(&large_store)).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
