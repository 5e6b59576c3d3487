use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::{criterion_group, criterion_main};
use lingors::rng_from_seed;
use lingors::{Cdf, LayoutSearch};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn from_elem(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_search");
    let mut rng = SmallRng::from_rng(&mut rng_from_seed(Some("seed1234")));

    // an all-zero reference is never beaten, so every search runs all of its attempts
    for dim in 4..=6 {
        let search = LayoutSearch::new(dim, 10, 200);
        let reference = Cdf::new(vec![0.0; search.num_open()]);
        group.bench_with_input(BenchmarkId::from_parameter(format!("dim={}", dim)), &search, |b, search| {
            b.iter(|| search.run(&reference, &mut rng).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, from_elem);
criterion_main!(benches);
