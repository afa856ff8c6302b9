//! The three transmission stages and their orchestration.
//!
//! - `oocyst`: gametocyte pool → oocyst-offspring pool (meiosis per oocyst)
//! - `sporozoite`: oocyst-offspring pool → distinct sporozoite genotypes
//! - `pipeline`: validation plus both stages
//! - `config`: serializable parameters for all of the above

pub mod config;
pub mod oocyst;
pub mod pipeline;
pub mod sporozoite;

pub use config::{ExecutionMode, TransmissionConfig, TransmissionConfigBuilder};
pub use oocyst::{OocystOffspring, OocystOffspringGenerator, generate_oocyst_offspring};
pub use pipeline::{TransmissionPipeline, TransmissionRecord, transmit};
pub use sporozoite::{
    SporozoiteSampler, deduplicate, draw_sporozoites, sample_sporozoites,
};
