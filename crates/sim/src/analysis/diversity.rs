//! Genotype diversity through the mosquito stages
//!
//! Measures how many distinct genotypes survive each bottleneck:
//! - Distinct oocyst-offspring and sporozoite genotypes per transmission
//! - Replicated exploration from random biallelic gametocyte pools
//! - Genotype (haplotype) diversity of a pool

use std::collections::HashMap;

use crate::base::Genotype;
use crate::errors::TransmissionError;
use crate::genome::GenotypePool;
use crate::transmission::TransmissionPipeline;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Distinct genotype counts from one transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversitySample {
    /// Distinct genotypes among all oocyst offspring
    pub distinct_oocyst_offspring: usize,
    /// Distinct sporozoite genotypes transmitted onward
    pub distinct_sporozoites: usize,
}

/// Means over replicated diversity samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiversitySummary {
    pub replicates: usize,
    pub mean_distinct_oocyst_offspring: f64,
    pub mean_distinct_sporozoites: f64,
}

/// Transmit one random biallelic gametocyte pool and count distinct genotypes.
///
/// # Arguments
///
/// * `n_strains` - Number of gametocyte genotypes in the blood meal
/// * `n_loci` - Barcode positions per genotype
/// * `pipeline` - Pipeline to transmit with
/// * `rng` - Random stream for both pool generation and transmission
///
/// # Errors
///
/// Returns `InvalidInput` when `n_strains == 0`.
pub fn explore_diversity<R: Rng + ?Sized>(
    n_strains: usize,
    n_loci: usize,
    pipeline: &TransmissionPipeline,
    rng: &mut R,
) -> Result<DiversitySample, TransmissionError> {
    let gametocytes = GenotypePool::random_biallelic(n_strains, n_loci, 0.5, rng)?;
    let record = pipeline.transmit_detailed(&gametocytes, None, rng)?;
    Ok(DiversitySample {
        distinct_oocyst_offspring: record.oocyst_offspring.n_distinct(),
        distinct_sporozoites: record.sporozoites.len(),
    })
}

/// Run `replicates` independent explorations in parallel.
///
/// Replicate `i` uses a private stream seeded by the `i`-th draw from `rng`,
/// so the result is reproducible for a seeded `rng`.
pub fn explore_diversity_replicates<R: Rng + ?Sized>(
    replicates: usize,
    n_strains: usize,
    n_loci: usize,
    pipeline: &TransmissionPipeline,
    rng: &mut R,
) -> Result<Vec<DiversitySample>, TransmissionError> {
    let seeds: Vec<u64> = (0..replicates).map(|_| rng.random()).collect();
    seeds
        .par_iter()
        .map(|&seed| {
            let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            explore_diversity(n_strains, n_loci, pipeline, &mut local_rng)
        })
        .collect()
}

/// Average the distinct counts over samples. Returns `None` for no samples.
pub fn summarize(samples: &[DiversitySample]) -> Option<DiversitySummary> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;
    let oocyst: usize = samples.iter().map(|s| s.distinct_oocyst_offspring).sum();
    let sporozoite: usize = samples.iter().map(|s| s.distinct_sporozoites).sum();
    Some(DiversitySummary {
        replicates: samples.len(),
        mean_distinct_oocyst_offspring: oocyst as f64 / n,
        mean_distinct_sporozoites: sporozoite as f64 / n,
    })
}

/// Genotype diversity `1 - Σ p_i²` over the genotype frequencies of a pool.
///
/// Returns 0.0 for an empty pool.
pub fn genotype_diversity(pool: &GenotypePool) -> f64 {
    let n = pool.len();
    if n == 0 {
        return 0.0;
    }

    let mut counts: HashMap<&Genotype, usize> = HashMap::new();
    for genotype in pool {
        *counts.entry(genotype).or_insert(0) += 1;
    }

    let sum_squared_freqs: f64 = counts
        .values()
        .map(|&count| {
            let freq = count as f64 / n as f64;
            freq * freq
        })
        .sum();

    1.0 - sum_squared_freqs
}
