//! Criterion benchmarks for cost evaluation and the optimizer.
//!
//! Uses synthetic networks with a fixed layout so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridbalance::anneal::{AnnealConfig, Optimizer};
use gridbalance::cost;
use gridbalance::network::{ConsumptionClass, Network};

/// `generators` generators of increasing capacity, `houses` houses of
/// cycling class, all connected to the first generator.
fn synthetic(generators: usize, houses: usize) -> Network {
    let mut net = Network::new();
    for g in 0..generators {
        net.upsert_generator(&format!("G{g:03}"), 50.0 + 25.0 * g as f64)
            .unwrap();
    }
    for h in 0..houses {
        let name = format!("H{h:04}");
        net.upsert_house(&name, ConsumptionClass::ALL[h % 3]).unwrap();
        net.connect(&name, "G000").unwrap();
    }
    net
}

fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost");

    for (generators, houses) in [(5usize, 50usize), (20, 500), (50, 2_000)] {
        let net = synthetic(generators, houses);
        group.bench_with_input(
            BenchmarkId::new("cost", format!("{generators}g_{houses}h")),
            &net,
            |b, net| b.iter(|| cost::cost(black_box(net)).unwrap()),
        );
    }
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);

    for (generators, houses) in [(5usize, 50usize), (20, 200)] {
        let net = synthetic(generators, houses);
        let config = AnnealConfig::default()
            .with_max_iterations(5_000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new("anneal", format!("{generators}g_{houses}h")),
            &net,
            |b, net| {
                b.iter(|| {
                    let mut net = net.clone();
                    Optimizer::run(black_box(&mut net), &config).unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cost, bench_optimize);
criterion_main!(benches);
