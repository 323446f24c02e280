/*
 * Flock Benchmark
 *
 * Measures the exhaustive flock step at the shipped school size and at a
 * few larger ones, to show where the O(n^2) neighbor search starts to hurt.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use fish_backdrop::camera::Viewport;
use fish_backdrop::params::{FlockParams, StarfieldParams};
use fish_backdrop::physics::{spawn_flock, step};
use fish_backdrop::starfield;

fn bench_flock_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_step");
    let viewport = Viewport::new(1920.0, 1080.0);

    for num_fish in [32, 128, 512].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_fish), num_fish, |b, &n| {
            let params = FlockParams {
                num_fish: n,
                ..FlockParams::default()
            };
            let mut rng = SmallRng::seed_from_u64(n as u64);
            let mut flock = spawn_flock(&params, viewport, &mut rng);
            let pointer = Vec2::new(960.0, 540.0);

            b.iter(|| {
                step(black_box(&mut flock), pointer, viewport, &params, &mut rng);
            });
        });
    }

    group.finish();
}

fn bench_starfield_advance(c: &mut Criterion) {
    let params = StarfieldParams::default();
    let mut rng = SmallRng::seed_from_u64(80);
    let mut stars = starfield::initialize(params.num_stars, 1920.0, 1080.0, &params, &mut rng);

    c.bench_function("starfield_advance", |b| {
        b.iter(|| starfield::advance(black_box(&mut stars), params.twinkle_step, params.twinkle_amplitude));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_flock_step, bench_starfield_advance
}

criterion_main!(benches);
