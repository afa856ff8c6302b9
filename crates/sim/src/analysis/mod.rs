//! Analysis of genotype pools produced by transmission.

pub mod diversity;

pub use diversity::{
    DiversitySample, DiversitySummary, explore_diversity, explore_diversity_replicates,
    genotype_diversity, summarize,
};
