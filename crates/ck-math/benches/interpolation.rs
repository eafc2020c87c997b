use ck_math::{Interpolation1D, NaturalCubicSpline, TridiagonalSystem};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn pillars(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (1..=n).map(|i| 0.5 * i as f64).collect();
    let ys = xs.iter().map(|t| t * (0.02 + 0.01 * (1.0 - (-t / 5.0_f64).exp()))).collect();
    (xs, ys)
}

fn bench_spline_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_build");
    for n in [5usize, 20, 100] {
        let (xs, ys) = pillars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| NaturalCubicSpline::new(black_box(&xs), black_box(&ys)).unwrap())
        });
    }
    group.finish();
}

fn bench_spline_eval(c: &mut Criterion) {
    let (xs, ys) = pillars(20);
    let spline = NaturalCubicSpline::new(&xs, &ys).unwrap();
    let queries: Vec<f64> = (1..=10_000).map(|i| 12.0 * i as f64 / 10_000.0).collect();

    let mut group = c.benchmark_group("spline_eval");
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("operator", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for x in &queries {
                acc += spline.operator(black_box(*x));
            }
            black_box(acc)
        })
    });
    group.finish();
}

fn bench_thomas(c: &mut Criterion) {
    let n = 1_000;
    let mut sys = TridiagonalSystem::new(n);
    for i in 0..n {
        sys.diag[i] = 4.0;
        sys.lower[i] = 1.0;
        sys.upper[i] = 1.0;
    }
    let rhs = vec![1.0; n];
    c.bench_function("thomas_1000", |b| b.iter(|| sys.solve(black_box(&rhs)).unwrap()));
}

criterion_group!(benches, bench_spline_build, bench_spline_eval, bench_thomas);
criterion_main!(benches);
