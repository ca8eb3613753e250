//! Banker Benchmark Suite - Counting vs Traced Recorders
//!
//! # Scenarios
//!
//! 1. **Classic snapshot**: 4 processes, 3 resources
//!    - Tests fixed overhead of both recorder backends
//!
//! 2. **Reverse chain**: worst case, one process finishes per pass
//!    - O(M² · N) comparisons
//!    - Traced mode clones the matrices at every step
//!
//! 3. **Dynamic arrivals**: one arrival per iteration
//!    - Tests need recomputation on every admission
//!    - Ends stuck once the source drains

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use banker_twin::domain::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn classic() -> SimulationInput {
    SimulationInput::new(
        vec![3, 3, 2],
        vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]],
        vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]],
    )
}

/// Process i needs `m - i` of every resource and holds 1, so only the last
/// unfinished index fits in each pass
fn reverse_chain(m: usize, n: usize) -> SimulationInput {
    let allocation = vec![vec![1; n]; m];
    let max = (0..m).map(|i| vec![(m - i) as u32 + 1; n]).collect();
    SimulationInput::new(vec![1; n], allocation, max)
}

/// P0 never fits, so the run lasts until the arrivals stop
fn starved() -> SimulationInput {
    SimulationInput::new(vec![3, 3, 3], vec![vec![0, 0, 0]], vec![vec![9, 9, 9]])
}

fn counting() -> Simulator {
    SimulatorBuilder::new().record_steps(false).build()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_classic(c: &mut Criterion) {
    let mut group = c.benchmark_group("classic");
    let input = classic();

    group.bench_function("counting", |b| {
        let simulator = counting();
        b.iter(|| black_box(simulator.run_standard(black_box(&input)).unwrap()));
    });

    group.bench_function("traced", |b| {
        let simulator = Simulator::default();
        b.iter(|| black_box(simulator.run_standard(black_box(&input)).unwrap()));
    });

    group.finish();
}

fn bench_reverse_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_chain");

    for m in [16usize, 64, 256].iter() {
        let input = reverse_chain(*m, 4);

        group.bench_with_input(BenchmarkId::new("counting", m), &input, |b, input| {
            let simulator = counting();
            b.iter(|| black_box(simulator.run_standard(input).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("traced", m), &input, |b, input| {
            let simulator = Simulator::default();
            b.iter(|| black_box(simulator.run_standard(input).unwrap()));
        });
    }

    group.finish();
}

fn bench_dynamic_arrivals(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_arrivals");
    let input = starved();

    for arrivals in [8usize, 64].iter() {
        group.bench_with_input(
            BenchmarkId::new("queued", arrivals),
            arrivals,
            |b, &arrivals| {
                let simulator = counting();
                b.iter(|| {
                    let mut source: QueuedArrivals =
                        std::iter::repeat(vec![1, 1, 1]).take(arrivals).collect();
                    black_box(simulator.run_dynamic(&input, &mut source).unwrap())
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_classic,
    bench_reverse_chain,
    bench_dynamic_arrivals
);

criterion_main!(benches);
