use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quantpde::config::BermudanPutConfig;
use quantpde::core::PricingEngine;
use quantpde::engines::pde::Bdf2Engine;
use std::hint::black_box;

// Target guideline:
// - default driver settings (34 nodes, 25 steps) well under 1ms.

fn bench_bermudan_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("bdf2_bermudan_put");
    for refinement in [0_u32, 2, 4] {
        let config = BermudanPutConfig {
            refinement,
            ..BermudanPutConfig::default()
        };
        let engine = Bdf2Engine::new(config.grid(), config.time_steps);
        let instrument = config.instrument();
        let market = config.market().unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(engine.grid.size()),
            &engine,
            |b, engine| b.iter(|| black_box(engine.price(&instrument, &market).unwrap().price)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_bermudan_put);
criterion_main!(benches);
