use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quantpde::config::BASE_SPOT_TICKS;
use quantpde::grid::Axis;
use std::hint::black_box;

fn bench_refine(c: &mut Criterion) {
    let base = Axis::new(BASE_SPOT_TICKS);
    let mut group = c.benchmark_group("axis_refine");
    for level in [0_u32, 2, 4, 8] {
        let axis = base.refine_times(level);
        group.throughput(Throughput::Elements(axis.size() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(level), &axis, |b, axis| {
            b.iter(|| black_box(axis.refine()))
        });
    }
    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let ticks: Vec<f64> = base_ticks(4);
    let mut group = c.benchmark_group("axis_construct");
    group.throughput(Throughput::Elements(ticks.len() as u64));
    group.bench_function("new", |b| b.iter(|| black_box(Axis::new(ticks.clone()))));
    group.bench_function("from_slice", |b| {
        b.iter(|| black_box(Axis::from_slice(black_box(&ticks))))
    });
    group.bench_function("try_new", |b| {
        b.iter(|| black_box(Axis::try_new(ticks.clone()).unwrap()))
    });
    group.finish();
}

fn base_ticks(level: u32) -> Vec<f64> {
    Axis::new(BASE_SPOT_TICKS).refine_times(level).ticks().to_vec()
}

criterion_group!(benches, bench_refine, bench_construct);
criterion_main!(benches);
