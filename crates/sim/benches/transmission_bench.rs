use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sporogony_sim::evolution::{OocystCountModel, meiosis};
use sporogony_sim::genome::GenotypePool;
use sporogony_sim::transmission::{
    ExecutionMode, OocystOffspringGenerator, TransmissionConfig, TransmissionPipeline,
};

fn bench_meiosis(c: &mut Criterion) {
    let mut group = c.benchmark_group("meiosis");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    for &n_loci in &[24, 300, 10_000] {
        let pool = GenotypePool::random_biallelic(2, n_loci, 0.5, &mut rng).unwrap();
        let (parent1, parent2) = (&pool.genotypes()[0], &pool.genotypes()[1]);

        group.throughput(Throughput::Elements(n_loci as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_loci), &n_loci, |b, _| {
            b.iter(|| black_box(meiosis(parent1, parent2, &mut rng).unwrap()))
        });
    }

    group.finish();
}

fn bench_oocyst_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("oocyst_offspring");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let pool = GenotypePool::random_biallelic(5, 10_000, 0.5, &mut rng).unwrap();

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let generator =
            OocystOffspringGenerator::new(OocystCountModel::Fpg).with_execution(mode);
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| black_box(generator.generate(&pool, &mut rng).unwrap()))
        });
    }

    group.finish();
}

fn bench_transmit(c: &mut Criterion) {
    let mut group = c.benchmark_group("transmit");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let pipeline = TransmissionPipeline::new(TransmissionConfig::default()).unwrap();

    for &(n_strains, n_loci) in &[(5, 24), (5, 300), (20, 300)] {
        let pool = GenotypePool::random_biallelic(n_strains, n_loci, 0.5, &mut rng).unwrap();
        let parameter_string = format!("strains={n_strains}/loci={n_loci}");
        group.bench_with_input(
            BenchmarkId::new("fpg", &parameter_string),
            &pool,
            |b, pool| b.iter(|| black_box(pipeline.transmit(pool, None, &mut rng).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_meiosis, bench_oocyst_execution, bench_transmit);
criterion_main!(benches);
