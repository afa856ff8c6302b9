//! Oocyst and sporozoite count distributions.
//!
//! Both counts are drawn once per transmission event. The `fpg` models use
//! negative binomial draws parameterised like EMOD's
//! `Num_Oocyst_In_Bite_Fail` / `Probability_Oocyst_In_Bite_Fails` (and the
//! sporozoite equivalents); `fwd-dream` uses a capped geometric draw.

use std::fmt;
use std::str::FromStr;

use crate::errors::TransmissionError;
use rand::Rng;
use rand_distr::{Distribution, Geometric};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Smallest accepted success probability.
pub const MIN_PROBABILITY: f64 = 1e-6;

/// Largest accepted expected count, and largest negative binomial `r`.
pub const MAX_EXPECTED_COUNT: f64 = 1e6;

/// A discrete distribution over non-negative counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountDistribution {
    /// Number of events counted before the `r`-th stop, where each trial
    /// stops with probability `p`. Mean `r (1 - p) / p`.
    NegativeBinomial { r: u32, p: f64 },
    /// Number of trials up to and including the first success (support
    /// starts at 1), truncated to `max`.
    CappedGeometric { p: f64, max: usize },
}

impl CountDistribution {
    /// Create a validated negative binomial distribution.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `r == 0`, `p` is outside
    /// [`MIN_PROBABILITY`, 1.0], or the mean exceeds [`MAX_EXPECTED_COUNT`].
    pub fn negative_binomial(r: u32, p: f64) -> Result<Self, TransmissionError> {
        let dist = Self::NegativeBinomial { r, p };
        dist.validate()?;
        Ok(dist)
    }

    /// Create a validated capped geometric distribution.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `max == 0` or `p` is outside
    /// [`MIN_PROBABILITY`, 1.0].
    pub fn capped_geometric(p: f64, max: usize) -> Result<Self, TransmissionError> {
        let dist = Self::CappedGeometric { p, max };
        dist.validate()?;
        Ok(dist)
    }

    /// Check parameter ranges. Deserialized values are unchecked until this runs.
    pub fn validate(&self) -> Result<(), TransmissionError> {
        let p = match *self {
            Self::NegativeBinomial { r, p } => {
                if r == 0 || f64::from(r) > MAX_EXPECTED_COUNT {
                    return Err(TransmissionError::InvalidParameter(format!(
                        "negative binomial r={r} (must be between 1 and {MAX_EXPECTED_COUNT})"
                    )));
                }
                p
            }
            Self::CappedGeometric { p, max } => {
                if max == 0 {
                    return Err(TransmissionError::InvalidParameter(
                        "geometric cap must be at least 1".into(),
                    ));
                }
                p
            }
        };

        if !(MIN_PROBABILITY..=1.0).contains(&p) {
            return Err(TransmissionError::InvalidParameter(format!(
                "probability {p} (must be between {MIN_PROBABILITY} and 1.0)"
            )));
        }

        let mean = self.mean();
        if mean > MAX_EXPECTED_COUNT {
            return Err(TransmissionError::InvalidParameter(format!(
                "expected count {mean} exceeds {MAX_EXPECTED_COUNT}"
            )));
        }
        Ok(())
    }

    /// Expected value of the distribution, before any cap.
    ///
    /// The capped geometric reports `min(1/p, max)`.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::NegativeBinomial { r, p } => f64::from(r) * (1.0 - p) / p,
            Self::CappedGeometric { p, max } => (1.0 / p).min(max as f64),
        }
    }

    /// Draw one count.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the parameters are out of range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, TransmissionError> {
        self.validate()?;
        let count = match *self {
            Self::NegativeBinomial { r, p } => {
                // Sum of r independent failure counts before a success.
                let geo = geometric(p)?;
                (0..r).try_fold(0usize, |total, _| {
                    let failures: u64 = geo.sample(rng);
                    usize::try_from(failures)
                        .ok()
                        .and_then(|f| total.checked_add(f))
                        .ok_or_else(|| {
                            TransmissionError::InvalidParameter(format!(
                                "negative binomial draw overflowed (r={r}, p={p})"
                            ))
                        })
                })?
            }
            Self::CappedGeometric { p, max } => {
                let failures: u64 = geometric(p)?.sample(rng);
                (failures as usize).saturating_add(1).min(max)
            }
        };
        Ok(count)
    }
}

fn geometric(p: f64) -> Result<Geometric, TransmissionError> {
    Geometric::new(p)
        .map_err(|e| TransmissionError::InvalidParameter(format!("geometric p={p}: {e}")))
}

/// Recognized models for the number of oocysts formed per bite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OocystCountModel {
    /// Negative binomial, r = 3, p = 0.5; floored at the requested minimum.
    #[default]
    #[serde(rename = "fpg")]
    Fpg,
    /// Geometric, p = 0.5, capped at 10.
    #[serde(rename = "fwd-dream")]
    FwdDream,
}

impl OocystCountModel {
    /// The distribution this model draws from.
    pub const fn distribution(self) -> CountDistribution {
        match self {
            Self::Fpg => CountDistribution::NegativeBinomial { r: 3, p: 0.5 },
            Self::FwdDream => CountDistribution::CappedGeometric { p: 0.5, max: 10 },
        }
    }

    /// Canonical model name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fpg => "fpg",
            Self::FwdDream => "fwd-dream",
        }
    }

    /// Whether draws are raised to the caller's minimum.
    ///
    /// `fwd-dream` draws are already at least 1 and are only capped.
    pub const fn applies_minimum(self) -> bool {
        matches!(self, Self::Fpg)
    }
}

impl fmt::Display for OocystCountModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OocystCountModel {
    type Err = TransmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fpg" => Ok(Self::Fpg),
            "fwd-dream" => Ok(Self::FwdDream),
            other => Err(TransmissionError::UnknownModel(other.to_string())),
        }
    }
}

/// Recognized models for the number of sporozoites formed per bite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SporozoiteCountModel {
    /// Negative binomial, r = 12, p = 0.5; floored at the requested minimum.
    #[default]
    #[serde(rename = "fpg")]
    Fpg,
}

impl SporozoiteCountModel {
    /// The distribution this model draws from.
    pub const fn distribution(self) -> CountDistribution {
        match self {
            Self::Fpg => CountDistribution::NegativeBinomial { r: 12, p: 0.5 },
        }
    }

    /// Canonical model name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fpg => "fpg",
        }
    }
}

impl fmt::Display for SporozoiteCountModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SporozoiteCountModel {
    type Err = TransmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fpg" => Ok(Self::Fpg),
            other => Err(TransmissionError::UnknownModel(other.to_string())),
        }
    }
}

/// Draws the number of oocysts formed in one transmission event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OocystCountSampler {
    model: OocystCountModel,
    distribution: CountDistribution,
}

impl OocystCountSampler {
    /// Sampler using the model's standard parameters.
    pub const fn new(model: OocystCountModel) -> Self {
        Self {
            model,
            distribution: model.distribution(),
        }
    }

    /// Sampler with overridden distribution parameters.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `distribution` is out of range.
    pub fn with_distribution(
        model: OocystCountModel,
        distribution: CountDistribution,
    ) -> Result<Self, TransmissionError> {
        distribution.validate()?;
        Ok(Self {
            model,
            distribution,
        })
    }

    #[inline]
    pub fn model(&self) -> OocystCountModel {
        self.model
    }

    #[inline]
    pub fn distribution(&self) -> CountDistribution {
        self.distribution
    }

    /// Draw an oocyst count, raised to `min_oocysts` where the model applies a floor.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        min_oocysts: usize,
        rng: &mut R,
    ) -> Result<usize, TransmissionError> {
        let raw = self.distribution.sample(rng)?;
        let count = if self.model.applies_minimum() {
            raw.max(min_oocysts)
        } else {
            raw
        };
        trace!(model = %self.model, raw, count, "sampled oocyst count");
        Ok(count)
    }
}

impl Default for OocystCountSampler {
    fn default() -> Self {
        Self::new(OocystCountModel::default())
    }
}

/// Draws the number of sporozoites formed in one transmission event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SporozoiteCountSampler {
    model: SporozoiteCountModel,
    distribution: CountDistribution,
}

impl SporozoiteCountSampler {
    /// Sampler using the model's standard parameters.
    pub const fn new(model: SporozoiteCountModel) -> Self {
        Self {
            model,
            distribution: model.distribution(),
        }
    }

    /// Sampler with overridden distribution parameters.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `distribution` is out of range.
    pub fn with_distribution(
        model: SporozoiteCountModel,
        distribution: CountDistribution,
    ) -> Result<Self, TransmissionError> {
        distribution.validate()?;
        Ok(Self {
            model,
            distribution,
        })
    }

    #[inline]
    pub fn model(&self) -> SporozoiteCountModel {
        self.model
    }

    #[inline]
    pub fn distribution(&self) -> CountDistribution {
        self.distribution
    }

    /// Draw a sporozoite count, raised to `min_sporozoites`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        min_sporozoites: usize,
        rng: &mut R,
    ) -> Result<usize, TransmissionError> {
        let raw = self.distribution.sample(rng)?;
        let count = raw.max(min_sporozoites);
        trace!(model = %self.model, raw, count, "sampled sporozoite count");
        Ok(count)
    }
}

impl Default for SporozoiteCountSampler {
    fn default() -> Self {
        Self::new(SporozoiteCountModel::default())
    }
}

/// Draw an oocyst count for the model named `model`.
///
/// # Errors
/// Returns `UnknownModel` for names other than `"fpg"` and `"fwd-dream"`.
pub fn sample_oocyst_count<R: Rng + ?Sized>(
    model: &str,
    min_oocysts: usize,
    rng: &mut R,
) -> Result<usize, TransmissionError> {
    OocystCountSampler::new(model.parse()?).sample(min_oocysts, rng)
}

/// Draw a sporozoite count from the standard `fpg` model.
pub fn sample_sporozoite_count<R: Rng + ?Sized>(
    min_sporozoites: usize,
    rng: &mut R,
) -> Result<usize, TransmissionError> {
    SporozoiteCountSampler::default().sample(min_sporozoites, rng)
}
