//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use sporogony_sim::prelude::*;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let pool = GenotypePool::from_rows(&[[0u8, 1, 1, 1, 0], [1, 0, 1, 0, 1]]).unwrap();
//! let sporozoites = transmit(&pool, None, &mut rng).unwrap();
//! assert!(!sporozoites.is_empty());
//! ```

pub use crate::base::{Allele, Genotype};
pub use crate::errors::{ConfigError, TransmissionError};
pub use crate::evolution::{
    CountDistribution, OocystCountModel, SporozoiteCountModel, meiosis, meiosis_into,
    sample_oocyst_count, sample_sporozoite_count,
};
pub use crate::genome::GenotypePool;
pub use crate::transmission::{
    ExecutionMode, TransmissionConfig, TransmissionPipeline, TransmissionRecord,
    generate_oocyst_offspring, sample_sporozoites, transmit,
};
