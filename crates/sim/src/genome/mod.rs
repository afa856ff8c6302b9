//! Genotype pools exchanged between transmission stages.

mod pool;

pub use pool::GenotypePool;
