//! Symbol interning benchmarks.
//!
//! Run with: `cargo bench --bench symbol_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flc_util::symbol::Symbol;

fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");
    group.throughput(Throughput::Elements(1));

    group.bench_function("intern_new_string", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            Symbol::intern(&format!("new_string_{}", counter))
        })
    });

    group.bench_function("intern_existing_string", |b| {
        let _sym = Symbol::intern("existing_string");
        b.iter(|| black_box(Symbol::intern("existing_string")))
    });

    group.bench_function("intern_known_keyword", |b| {
        b.iter(|| black_box(Symbol::intern("def")))
    });

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let sym1 = Symbol::intern("hello");
    let sym2 = Symbol::intern("hello");
    let sym3 = Symbol::intern("world");

    c.bench_function("symbol_eq_symbol", |b| {
        b.iter(|| {
            black_box(sym1 == sym2);
            black_box(sym1 == sym3);
        })
    });
}

criterion_group!(benches, bench_intern, bench_comparison);
criterion_main!(benches);
