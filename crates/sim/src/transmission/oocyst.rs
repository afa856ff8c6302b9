//! Gametocyte to oocyst-offspring stage.
//!
//! Each oocyst is one independent fertilisation: two parents are drawn
//! uniformly with replacement from the gametocyte pool and recombined by
//! meiosis into four offspring. A single-genotype pool has no recombination
//! source and passes through unchanged.

use crate::base::Genotype;
use crate::errors::TransmissionError;
use crate::evolution::{OFFSPRING_PER_MEIOSIS, OocystCountModel, OocystCountSampler, meiosis_into};
use crate::genome::GenotypePool;
use crate::transmission::config::{ExecutionMode, TransmissionConfig};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::debug;

/// Oocyst-offspring pool together with the number of oocysts that formed it.
#[derive(Debug, Clone, PartialEq)]
pub struct OocystOffspring {
    /// Oocysts formed, or `None` for clonal propagation
    pub n_oocysts: Option<usize>,
    /// All offspring genotypes, four per oocyst, in oocyst order
    pub pool: GenotypePool,
}

/// Builds the oocyst-offspring pool from a gametocyte pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OocystOffspringGenerator {
    sampler: OocystCountSampler,
    min_oocysts: usize,
    execution: ExecutionMode,
}

impl OocystOffspringGenerator {
    /// Sequential generator for `model` with at least one oocyst per mixed infection.
    pub fn new(model: OocystCountModel) -> Self {
        Self {
            sampler: OocystCountSampler::new(model),
            min_oocysts: 1,
            execution: ExecutionMode::Sequential,
        }
    }

    /// Generator described by `config`.
    pub fn from_config(config: &TransmissionConfig) -> Result<Self, TransmissionError> {
        config.validate()?;
        Ok(Self {
            sampler: config.oocyst_sampler()?,
            min_oocysts: config.min_oocysts,
            execution: config.execution,
        })
    }

    /// Change the execution strategy.
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    #[inline]
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    /// Generate the oocyst-offspring pool.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty pool.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        gametocytes: &GenotypePool,
        rng: &mut R,
    ) -> Result<GenotypePool, TransmissionError> {
        Ok(self.generate_detailed(gametocytes, rng)?.pool)
    }

    /// Generate the oocyst-offspring pool and report the oocyst count.
    pub fn generate_detailed<R: Rng + ?Sized>(
        &self,
        gametocytes: &GenotypePool,
        rng: &mut R,
    ) -> Result<OocystOffspring, TransmissionError> {
        if gametocytes.is_empty() {
            return Err(TransmissionError::InvalidInput(
                "gametocyte pool is empty".into(),
            ));
        }

        if gametocytes.len() == 1 {
            debug!("single gametocyte genotype, clonal propagation");
            return Ok(OocystOffspring {
                n_oocysts: None,
                pool: gametocytes.clone(),
            });
        }

        let n_oocysts = self.sampler.sample(self.min_oocysts, rng)?;
        debug!(
            n_oocysts,
            n_gametocytes = gametocytes.len(),
            execution = ?self.execution,
            "forming oocysts"
        );

        let mut offspring = Vec::with_capacity(n_oocysts * OFFSPRING_PER_MEIOSIS);
        match self.execution {
            ExecutionMode::Sequential => {
                for _ in 0..n_oocysts {
                    form_oocyst(gametocytes, &mut offspring, rng)?;
                }
            }
            ExecutionMode::Parallel => {
                // Seeds are drawn in oocyst order so the result does not
                // depend on scheduling.
                let seeds: Vec<u64> = (0..n_oocysts).map(|_| rng.random()).collect();
                let broods = seeds
                    .par_iter()
                    .map(|&seed| {
                        let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                        let mut brood = Vec::with_capacity(OFFSPRING_PER_MEIOSIS);
                        form_oocyst(gametocytes, &mut brood, &mut local_rng)?;
                        Ok::<_, TransmissionError>(brood)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                offspring.extend(broods.into_iter().flatten());
            }
        }

        let mut pool = GenotypePool::with_capacity(gametocytes.n_loci(), offspring.len());
        pool.extend_unchecked(offspring);

        Ok(OocystOffspring {
            n_oocysts: Some(n_oocysts),
            pool,
        })
    }
}

impl Default for OocystOffspringGenerator {
    fn default() -> Self {
        Self::new(OocystCountModel::default())
    }
}

/// Draw a parent pair (with replacement, so selfing is possible) and append
/// its four offspring to `out`. All four are kept even when the parents coincide.
fn form_oocyst<R: Rng + ?Sized>(
    gametocytes: &GenotypePool,
    out: &mut Vec<Genotype>,
    rng: &mut R,
) -> Result<(), TransmissionError> {
    let n = gametocytes.len();
    let parents = gametocytes.genotypes();
    let first = rng.random_range(0..n);
    let second = rng.random_range(0..n);
    meiosis_into(&parents[first], &parents[second], out, rng)
}

/// Generate the oocyst-offspring pool sequentially with `model`'s standard parameters.
pub fn generate_oocyst_offspring<R: Rng + ?Sized>(
    gametocytes: &GenotypePool,
    model: OocystCountModel,
    rng: &mut R,
) -> Result<GenotypePool, TransmissionError> {
    OocystOffspringGenerator::new(model).generate(gametocytes, rng)
}
