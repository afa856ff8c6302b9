//! Base types for genotype representation.
//!
//! This module provides the allele code and the fixed-length genotype vector
//! that every transmission stage operates on.

mod allele;
mod genotype;

pub use allele::Allele;
pub use genotype::Genotype;
