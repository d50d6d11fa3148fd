//! Criterion microbench for the grid decomposition pipeline: clearance
//! computation, best-rectangle scan, and the full iterative decompose loop
//! on a synthetic random grid.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use navmesh::grid::parse_map;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_map(height: usize, width: usize, obstacle_frac: f64, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut body = String::with_capacity(height * (width + 1));
    for _ in 0..height {
        for _ in 0..width {
            let c = if rng.gen_bool(obstacle_frac) { '@' } else { '.' };
            body.push(c);
        }
        body.push('\n');
    }
    format!("type octile\nwidth {width}\nheight {height}\nmap\n{body}")
}

fn bench_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_decomposition");
    for &size in &[16usize, 32, 64] {
        let map = random_map(size, size, 0.15, 42);
        group.bench_function(BenchmarkId::new("compute_clearance", size), |b| {
            b.iter_batched(
                || parse_map(&map).unwrap(),
                |mut session| session.compute_clearance(),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("decompose", size), |b| {
            b.iter_batched(
                || {
                    let mut session = parse_map(&map).unwrap();
                    session.compute_clearance();
                    session.compute_best_rects();
                    session
                },
                |mut session| session.decompose(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decomposition);
criterion_main!(benches);
