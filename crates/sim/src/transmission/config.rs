//! Transmission configuration.
//!
//! A `TransmissionConfig` fully describes how one bite is simulated and can
//! be read from JSON to reproduce a run.

use std::path::Path;

use crate::errors::{ConfigError, TransmissionError};
use crate::evolution::{
    CountDistribution, OocystCountModel, OocystCountSampler, SporozoiteCountModel,
    SporozoiteCountSampler,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

/// How independent oocysts are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One stream, consumed in oocyst order then locus order.
    #[default]
    Sequential,
    /// One private stream per oocyst, seeded from the caller's stream in
    /// oocyst order, processed on the rayon pool.
    Parallel,
}

/// Parameters for one transmission event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionConfig {
    /// Oocyst count model
    pub oocyst_model: OocystCountModel,
    /// Override for the oocyst model's distribution parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oocyst_distribution: Option<CountDistribution>,
    /// Sporozoite count model
    pub sporozoite_model: SporozoiteCountModel,
    /// Override for the sporozoite model's distribution parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sporozoite_distribution: Option<CountDistribution>,
    /// Oocysts formed in a mixed infection are raised to at least this many
    pub min_oocysts: usize,
    /// Sporozoite draws are raised to at least this many
    pub min_sporozoites: usize,
    /// Execution strategy for oocyst formation
    pub execution: ExecutionMode,
    /// Optional RNG seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            oocyst_model: OocystCountModel::Fpg,
            oocyst_distribution: None,
            sporozoite_model: SporozoiteCountModel::Fpg,
            sporozoite_distribution: None,
            min_oocysts: 1,
            min_sporozoites: 1,
            execution: ExecutionMode::Sequential,
            seed: None,
        }
    }
}

impl TransmissionConfig {
    /// Start a fluent builder from the defaults.
    pub fn builder() -> TransmissionConfigBuilder {
        TransmissionConfigBuilder::new()
    }

    /// Check that every stage can run with these parameters.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for a zero minimum or an out-of-range
    /// distribution override.
    pub fn validate(&self) -> Result<(), TransmissionError> {
        if self.min_oocysts == 0 {
            return Err(TransmissionError::InvalidParameter(
                "min_oocysts must be at least 1".into(),
            ));
        }
        if self.min_sporozoites == 0 {
            return Err(TransmissionError::InvalidParameter(
                "min_sporozoites must be at least 1".into(),
            ));
        }
        self.oocyst_sampler()?;
        self.sporozoite_sampler()?;
        Ok(())
    }

    /// The oocyst count sampler described by this config.
    pub fn oocyst_sampler(&self) -> Result<OocystCountSampler, TransmissionError> {
        match self.oocyst_distribution {
            Some(dist) => OocystCountSampler::with_distribution(self.oocyst_model, dist),
            None => Ok(OocystCountSampler::new(self.oocyst_model)),
        }
    }

    /// The sporozoite count sampler described by this config.
    pub fn sporozoite_sampler(&self) -> Result<SporozoiteCountSampler, TransmissionError> {
        match self.sporozoite_distribution {
            Some(dist) => SporozoiteCountSampler::with_distribution(self.sporozoite_model, dist),
            None => Ok(SporozoiteCountSampler::new(self.sporozoite_model)),
        }
    }

    /// Create the RNG for a run: seeded if `seed` is set, otherwise from entropy.
    pub fn rng(&self) -> Xoshiro256PlusPlus {
        match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for [`TransmissionConfig`].
///
/// # Examples
///
/// ```
/// use sporogony_sim::transmission::{ExecutionMode, TransmissionConfig};
/// use sporogony_sim::evolution::OocystCountModel;
///
/// let config = TransmissionConfig::builder()
///     .oocyst_model(OocystCountModel::FwdDream)
///     .execution(ExecutionMode::Parallel)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransmissionConfigBuilder {
    config: TransmissionConfig,
}

impl TransmissionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn oocyst_model(mut self, model: OocystCountModel) -> Self {
        self.config.oocyst_model = model;
        self
    }

    /// Set the oocyst model by name (`"fpg"` or `"fwd-dream"`).
    pub fn oocyst_model_name(self, name: &str) -> Result<Self, TransmissionError> {
        Ok(self.oocyst_model(name.parse()?))
    }

    pub fn oocyst_distribution(mut self, distribution: CountDistribution) -> Self {
        self.config.oocyst_distribution = Some(distribution);
        self
    }

    pub fn sporozoite_model(mut self, model: SporozoiteCountModel) -> Self {
        self.config.sporozoite_model = model;
        self
    }

    pub fn sporozoite_distribution(mut self, distribution: CountDistribution) -> Self {
        self.config.sporozoite_distribution = Some(distribution);
        self
    }

    pub fn min_oocysts(mut self, min: usize) -> Self {
        self.config.min_oocysts = min;
        self
    }

    pub fn min_sporozoites(mut self, min: usize) -> Self {
        self.config.min_sporozoites = min;
        self
    }

    pub fn execution(mut self, mode: ExecutionMode) -> Self {
        self.config.execution = mode;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<TransmissionConfig, TransmissionError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
