//! End-to-end transmission through the mosquito.
//!
//! Gametocytes from a blood meal are validated, recombined into
//! oocyst offspring, and sampled into the distinct sporozoite genotypes
//! that can infect the next host.

use crate::errors::TransmissionError;
use crate::genome::GenotypePool;
use crate::transmission::config::TransmissionConfig;
use crate::transmission::oocyst::OocystOffspringGenerator;
use crate::transmission::sporozoite::{SporozoiteSampler, deduplicate};
use rand::Rng;
use tracing::debug;

/// Every intermediate product of one transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct TransmissionRecord {
    /// Oocysts formed, or `None` when the single gametocyte genotype propagated clonally
    pub n_oocysts: Option<usize>,
    /// All oocyst offspring, duplicates included
    pub oocyst_offspring: GenotypePool,
    /// Number of sporozoites drawn before deduplication
    pub sporozoites_drawn: usize,
    /// Distinct sporozoite genotypes, sorted
    pub sporozoites: GenotypePool,
}

/// Runs the gametocyte → oocyst → sporozoite pipeline.
#[derive(Debug, Clone)]
pub struct TransmissionPipeline {
    config: TransmissionConfig,
    oocysts: OocystOffspringGenerator,
    sporozoites: SporozoiteSampler,
}

impl TransmissionPipeline {
    /// Create a pipeline from a configuration.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the configuration does not validate.
    pub fn new(config: TransmissionConfig) -> Result<Self, TransmissionError> {
        let oocysts = OocystOffspringGenerator::from_config(&config)?;
        let sporozoites = SporozoiteSampler::from_config(&config)?;
        Ok(Self {
            config,
            oocysts,
            sporozoites,
        })
    }

    /// The configuration this pipeline was built from.
    pub fn config(&self) -> &TransmissionConfig {
        &self.config
    }

    /// Check that a gametocyte pool may enter the pipeline.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty pool or any undefined allele.
    pub fn validate_input(gametocytes: &GenotypePool) -> Result<(), TransmissionError> {
        if gametocytes.is_empty() {
            return Err(TransmissionError::InvalidInput(
                "gametocyte pool is empty".into(),
            ));
        }
        if let Some((index, locus)) = gametocytes.first_missing() {
            return Err(TransmissionError::InvalidInput(format!(
                "undefined allele in gametocyte genotype {index} at locus {locus}"
            )));
        }
        Ok(())
    }

    /// Transmit a gametocyte pool and return the distinct sporozoite genotypes.
    ///
    /// `densities` is accepted for density-weighted parent selection but does
    /// not affect sampling: every gametocyte genotype is equally likely.
    ///
    /// # Errors
    /// Returns `InvalidInput` before any random draw if the pool is empty or
    /// contains an undefined allele.
    pub fn transmit<R: Rng + ?Sized>(
        &self,
        gametocytes: &GenotypePool,
        densities: Option<&[f64]>,
        rng: &mut R,
    ) -> Result<GenotypePool, TransmissionError> {
        Ok(self
            .transmit_detailed(gametocytes, densities, rng)?
            .sporozoites)
    }

    /// Transmit and keep the intermediate pools.
    pub fn transmit_detailed<R: Rng + ?Sized>(
        &self,
        gametocytes: &GenotypePool,
        densities: Option<&[f64]>,
        rng: &mut R,
    ) -> Result<TransmissionRecord, TransmissionError> {
        Self::validate_input(gametocytes)?;
        if let Some(densities) = densities {
            debug!(
                n_densities = densities.len(),
                "gametocyte densities ignored, sampling parents uniformly"
            );
        }

        let oocyst = self.oocysts.generate_detailed(gametocytes, rng)?;
        let drawn = self.sporozoites.draw(&oocyst.pool, rng)?;
        let sporozoites_drawn = drawn.len();
        let sporozoites = deduplicate(drawn);

        debug!(
            n_gametocytes = gametocytes.len(),
            n_oocysts = ?oocyst.n_oocysts,
            n_offspring = oocyst.pool.len(),
            sporozoites_drawn,
            n_sporozoites = sporozoites.len(),
            "transmission complete"
        );

        Ok(TransmissionRecord {
            n_oocysts: oocyst.n_oocysts,
            oocyst_offspring: oocyst.pool,
            sporozoites_drawn,
            sporozoites,
        })
    }
}

impl Default for TransmissionPipeline {
    fn default() -> Self {
        Self {
            config: TransmissionConfig::default(),
            oocysts: OocystOffspringGenerator::default(),
            sporozoites: SporozoiteSampler::default(),
        }
    }
}

/// Transmit with the default `fpg` configuration.
pub fn transmit<R: Rng + ?Sized>(
    gametocytes: &GenotypePool,
    densities: Option<&[f64]>,
    rng: &mut R,
) -> Result<GenotypePool, TransmissionError> {
    TransmissionPipeline::default().transmit(gametocytes, densities, rng)
}
