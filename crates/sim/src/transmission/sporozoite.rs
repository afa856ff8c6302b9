//! Oocyst-offspring to sporozoite stage.
//!
//! Sporozoites are drawn uniformly with replacement from the oocyst-offspring
//! pool. Offspring are equally likely regardless of which oocyst produced
//! them, and the onward pool keeps only distinct genotypes.

use crate::errors::TransmissionError;
use crate::evolution::SporozoiteCountSampler;
use crate::genome::GenotypePool;
use crate::transmission::config::TransmissionConfig;
use rand::Rng;
use tracing::debug;

/// Samples the sporozoite genotypes available for onward transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SporozoiteSampler {
    sampler: SporozoiteCountSampler,
    min_sporozoites: usize,
}

impl SporozoiteSampler {
    /// Sampler with the standard `fpg` count model and at least one sporozoite.
    pub fn new() -> Self {
        Self {
            sampler: SporozoiteCountSampler::default(),
            min_sporozoites: 1,
        }
    }

    /// Sampler described by `config`.
    pub fn from_config(config: &TransmissionConfig) -> Result<Self, TransmissionError> {
        config.validate()?;
        Ok(Self {
            sampler: config.sporozoite_sampler()?,
            min_sporozoites: config.min_sporozoites,
        })
    }

    /// Draw sporozoite genotypes with replacement, keeping multiplicity.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the oocyst-offspring pool is empty.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        oocyst_offspring: &GenotypePool,
        rng: &mut R,
    ) -> Result<GenotypePool, TransmissionError> {
        if oocyst_offspring.is_empty() {
            return Err(TransmissionError::InvalidInput(
                "oocyst-offspring pool is empty".into(),
            ));
        }

        let n_sporozoites = self.sampler.sample(self.min_sporozoites, rng)?;
        let candidates = oocyst_offspring.genotypes();

        let mut drawn = GenotypePool::with_capacity(oocyst_offspring.n_loci(), n_sporozoites);
        drawn.extend_unchecked((0..n_sporozoites).map(|_| {
            let index = rng.random_range(0..candidates.len());
            candidates[index].clone()
        }));
        Ok(drawn)
    }

    /// Draw sporozoites and keep each distinct genotype once, sorted.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        oocyst_offspring: &GenotypePool,
        rng: &mut R,
    ) -> Result<GenotypePool, TransmissionError> {
        let drawn = self.draw(oocyst_offspring, rng)?;
        Ok(deduplicate(drawn))
    }
}

impl Default for SporozoiteSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse a drawn sporozoite pool to its distinct genotypes.
///
/// A single draw is returned as is.
pub fn deduplicate(drawn: GenotypePool) -> GenotypePool {
    if drawn.len() == 1 {
        return drawn;
    }
    let distinct = drawn.distinct();
    debug!(
        drawn = drawn.len(),
        distinct = distinct.len(),
        "deduplicated sporozoites"
    );
    distinct
}

/// Draw raw sporozoite genotypes with the standard count model.
pub fn draw_sporozoites<R: Rng + ?Sized>(
    oocyst_offspring: &GenotypePool,
    rng: &mut R,
) -> Result<GenotypePool, TransmissionError> {
    SporozoiteSampler::new().draw(oocyst_offspring, rng)
}

/// Draw sporozoites with the standard count model and deduplicate them.
pub fn sample_sporozoites<R: Rng + ?Sized>(
    oocyst_offspring: &GenotypePool,
    rng: &mut R,
) -> Result<GenotypePool, TransmissionError> {
    SporozoiteSampler::new().sample(oocyst_offspring, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Genotype;
    use crate::evolution::CountDistribution;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn offspring_pool() -> GenotypePool {
        GenotypePool::from_rows(&[
            [0u8, 0, 1],
            [0, 1, 1],
            [0, 0, 1],
            [1, 1, 0],
            [1, 0, 0],
            [0, 0, 1],
            [1, 1, 1],
            [0, 1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_sampled_genotypes_come_from_pool() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let pool = offspring_pool();
        for _ in 0..200 {
            let sporozoites = sample_sporozoites(&pool, &mut rng).unwrap();
            assert!(!sporozoites.is_empty());
            assert!(sporozoites.len() <= pool.n_distinct());
            assert!(sporozoites.iter().all(|g| pool.contains(g)));
        }
    }

    #[test]
    fn test_distinct_never_exceeds_draws() {
        let pool = offspring_pool();
        let sampler = SporozoiteSampler::new();
        for seed in 0..200 {
            let drawn = sampler
                .draw(&pool, &mut Xoshiro256PlusPlus::seed_from_u64(seed))
                .unwrap();
            let sampled = sampler
                .sample(&pool, &mut Xoshiro256PlusPlus::seed_from_u64(seed))
                .unwrap();
            assert!(drawn.len() >= 1);
            assert!(sampled.len() <= drawn.len());
            assert_eq!(sampled, deduplicate(drawn));
        }
    }

    #[test]
    fn test_output_is_sorted_and_distinct() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let sporozoites = sample_sporozoites(&offspring_pool(), &mut rng).unwrap();
        let genotypes = sporozoites.genotypes();
        assert!(genotypes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_draw_returned_directly() {
        let drawn = GenotypePool::single(Genotype::from(vec![1, 0, 1]));
        assert_eq!(deduplicate(drawn.clone()), drawn);
    }

    #[test]
    fn test_identical_draws_collapse_to_one() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let pool = GenotypePool::from_rows(&[[1u8, 1], [1, 1], [1, 1], [1, 1]]).unwrap();
        let sporozoites = sample_sporozoites(&pool, &mut rng).unwrap();
        assert_eq!(sporozoites.len(), 1);
        assert_eq!(sporozoites.get(0).unwrap().codes(), vec![1, 1]);
    }

    #[test]
    fn test_empty_pool_is_invalid() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let result = sample_sporozoites(&GenotypePool::with_loci(4), &mut rng);
        assert!(matches!(result, Err(TransmissionError::InvalidInput(_))));
    }

    #[test]
    fn test_draw_keeps_every_sporozoite() {
        let config = TransmissionConfig::builder()
            .sporozoite_distribution(CountDistribution::negative_binomial(1, 1.0).unwrap())
            .min_sporozoites(37)
            .build()
            .unwrap();
        let sampler = SporozoiteSampler::from_config(&config).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..20 {
            let drawn = sampler.draw(&offspring_pool(), &mut rng).unwrap();
            assert_eq!(drawn.len(), 37);
            assert_eq!(drawn.n_loci(), 3);
        }
    }

    #[test]
    fn test_min_sporozoites_from_config() {
        let config = TransmissionConfig::builder()
            .min_sporozoites(40)
            .build()
            .unwrap();
        let sampler = SporozoiteSampler::from_config(&config).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..50 {
            assert!(sampler.draw(&offspring_pool(), &mut rng).unwrap().len() >= 40);
        }
    }
}
