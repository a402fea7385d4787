use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use defect_annihilation::{
    creator::{ChargeCreator, RandomChargeCreator},
    PhysicsParams, Simulation,
};

fn simulation(n_charges: u32) -> Simulation {
    let charges = RandomChargeCreator::new(0, 1e4, 1e4, 50.)
        .unwrap()
        .create_charges(n_charges)
        .unwrap();
    Simulation::from_params(charges, PhysicsParams::default()).unwrap()
}

fn step_charges(c: &mut Criterion) {
    let mut group = c.benchmark_group("step charges");
    for n_charges in [100, 1_000, 5_000] {
        group.bench_with_input(
            BenchmarkId::new("single threaded", n_charges),
            &n_charges,
            |b, &n_charges| {
                b.iter_batched_ref(
                    || simulation(n_charges),
                    |sim| sim.simulate(1e-5, 10).unwrap(),
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("multithreaded", n_charges),
            &n_charges,
            |b, &n_charges| {
                b.iter_batched_ref(
                    || simulation(n_charges).multithreaded(4),
                    |sim| sim.simulate(1e-5, 10).unwrap(),
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rayon", n_charges),
            &n_charges,
            |b, &n_charges| {
                b.iter_batched_ref(
                    || simulation(n_charges).rayon_iter(),
                    |sim| sim.simulate(1e-5, 10).unwrap(),
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn annihilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("annihilation");
    for n_charges in [100, 1_000, 5_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_charges),
            &n_charges,
            |b, &n_charges| {
                b.iter_batched(
                    || simulation(n_charges).into_charges(),
                    |charges| PhysicsParams::default().annihilation.apply(charges),
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, step_charges, annihilation);
criterion_main!(benches);
