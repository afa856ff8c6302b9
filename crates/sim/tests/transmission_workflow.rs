//! End-to-end tests of the gametocyte → sporozoite pipeline.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sporogony_sim::analysis::{explore_diversity_replicates, summarize};
use sporogony_sim::prelude::*;
use std::str::FromStr;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sporogony_sim=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_meiosis_concrete_parents() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);
    let parent1 = Genotype::from_str("01110").unwrap();
    let parent2 = Genotype::from_str("10101").unwrap();

    let offspring = meiosis(&parent1, &parent2, &mut rng).unwrap();
    assert_eq!(offspring.len(), 4);
    for locus in 0..5 {
        let mut column: Vec<u8> = offspring.iter().map(|g| g.codes()[locus]).collect();
        column.sort_unstable();
        let (a, b) = (parent1.codes()[locus], parent2.codes()[locus]);
        let mut expected = vec![a, a, b, b];
        expected.sort_unstable();
        assert_eq!(column, expected, "locus {locus}");
    }
}

#[test]
fn test_clonal_transmission() {
    init_tracing();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let pool = GenotypePool::from_rows(&[[1u8, 0, 1]]).unwrap();
    let result = transmit(&pool, None, &mut rng).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.get(0).unwrap().codes(), vec![1, 0, 1]);
}

#[test]
fn test_unknown_model_fails() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    assert_eq!(
        sample_oocyst_count("unknown", 0, &mut rng),
        Err(TransmissionError::UnknownModel("unknown".into()))
    );
}

#[test]
fn test_fpg_oocyst_count_mean() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(31337);
    let n = 10_000;
    let total: usize = (0..n)
        .map(|_| sample_oocyst_count("fpg", 0, &mut rng).unwrap())
        .sum();
    let mean = total as f64 / n as f64;
    assert!((mean - 3.0).abs() < 0.1, "mean {mean}");
}

#[test]
fn test_mixed_infection_end_to_end() {
    init_tracing();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let gametocytes = GenotypePool::random_biallelic(10, 24, 0.5, &mut rng).unwrap();
    let pipeline = TransmissionPipeline::new(TransmissionConfig::default()).unwrap();

    for _ in 0..50 {
        let record = pipeline
            .transmit_detailed(&gametocytes, None, &mut rng)
            .unwrap();
        let n_oocysts = record.n_oocysts.unwrap();
        assert!(n_oocysts >= 1);
        assert_eq!(record.oocyst_offspring.len(), 4 * n_oocysts);
        assert!(record.sporozoites.len() <= record.sporozoites_drawn);
        assert!(record.sporozoites.iter().all(|g| g.len() == 24));
        assert!(
            record
                .sporozoites
                .iter()
                .all(|g| record.oocyst_offspring.contains(g))
        );
    }
}

#[test]
fn test_seeded_config_reproduces_run() {
    let config = TransmissionConfig::from_json_str(
        r#"{"oocyst_model": "fwd-dream", "execution": "parallel", "seed": 17}"#,
    )
    .unwrap();
    let pipeline = TransmissionPipeline::new(config.clone()).unwrap();
    let gametocytes =
        GenotypePool::random_biallelic(6, 100, 0.5, &mut config.rng()).unwrap();

    let a = pipeline
        .transmit_detailed(&gametocytes, None, &mut config.rng())
        .unwrap();
    let b = pipeline
        .transmit_detailed(&gametocytes, None, &mut config.rng())
        .unwrap();
    assert_eq!(a, b);
    assert!(a.n_oocysts.unwrap() <= 10);
}

#[test]
fn test_missing_allele_is_rejected() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let pool = GenotypePool::from_genotypes(vec![
        Genotype::from_str("0110").unwrap(),
        Genotype::from_str("01.0").unwrap(),
    ])
    .unwrap();
    let err = transmit(&pool, None, &mut rng).unwrap_err();
    assert!(matches!(err, TransmissionError::InvalidInput(_)));
    assert!(err.to_string().contains("locus 2"));
}

#[test]
fn test_pool_json_exchange() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let gametocytes: GenotypePool = serde_json::from_str("[[0,1,1,0],[1,1,0,0],[0,0,0,1]]").unwrap();
    let sporozoites = transmit(&gametocytes, None, &mut rng).unwrap();
    let json = serde_json::to_string(&sporozoites).unwrap();
    let back: GenotypePool = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sporozoites);
}

#[test]
fn test_sporozoite_bottleneck_reduces_diversity() {
    let pipeline = TransmissionPipeline::default();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let samples = explore_diversity_replicates(500, 5, 30, &pipeline, &mut rng).unwrap();
    let summary = summarize(&samples).unwrap();

    assert_eq!(summary.replicates, 500);
    assert!(summary.mean_distinct_sporozoites >= 1.0);
    assert!(summary.mean_distinct_sporozoites <= summary.mean_distinct_oocyst_offspring);
}
