// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Vacuum Chain Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use simplicity_math::symplectic::Integrator;
use simplicity_sim::vacuum::{simulate_mode, LatticeChain};
use std::hint::black_box;

fn bench_vacuum_mode(c: &mut Criterion) {
    let mut group = c.benchmark_group("vacuum_mode");

    for &nodes in &[32usize, 128, 512] {
        let chain = LatticeChain::from_lattice(nodes, 1.0, 1.0).expect("chain should build");
        for integrator in [Integrator::VelocityVerlet, Integrator::Rk4] {
            let label = format!("{nodes}nodes_{integrator:?}");
            group.bench_function(&label, |b| {
                b.iter(|| {
                    let run = simulate_mode(&chain, 1, 0.01, 0.05, 500, integrator)
                        .expect("mode run should succeed");
                    black_box(run.relative_energy_drift);
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_vacuum_mode);
criterion_main!(benches);
