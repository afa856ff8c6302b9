//! Stochastic operators applied inside the mosquito.
//!
//! - **Meiosis**: per-locus independent recombination of two parents into four offspring
//! - **Counts**: oocyst and sporozoite count distributions

pub mod counts;
pub mod meiosis;

pub use counts::{
    CountDistribution, MAX_EXPECTED_COUNT, MIN_PROBABILITY, OocystCountModel, OocystCountSampler,
    SporozoiteCountModel, SporozoiteCountSampler, sample_oocyst_count, sample_sporozoite_count,
};
pub use meiosis::{OFFSPRING_PER_MEIOSIS, meiosis, meiosis_into};
