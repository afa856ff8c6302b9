//! # Simulation Crate
//!
//! The `sporogony_sim` crate models what happens to malaria parasite
//! genotypes inside the mosquito. A pool of gametocyte genotypes taken up in
//! a blood meal is recombined by meiosis inside a random number of oocysts,
//! and a random number of sporozoites is then drawn from the oocyst offspring
//! and deduplicated into the genotypes available to infect the next host.
//!
//! Every stochastic operation takes the random stream explicitly, so a seeded
//! generator reproduces a run exactly.

pub mod analysis;
pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod transmission;

pub use base::{Allele, Genotype};
pub use errors::TransmissionError;
pub use genome::GenotypePool;
