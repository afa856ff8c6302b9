use thiserror::Error;

/// Error returned when a character cannot be parsed as an allele code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid allele character: '{0}'")]
pub struct InvalidAllele(pub char);

/// Errors raised by the transmission stages.
///
/// Every variant is deterministic: the same input always fails the same way,
/// so callers own any retry policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransmissionError {
    /// The gametocyte pool cannot enter the pipeline (missing allele, empty pool).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A distribution model name was not recognized.
    #[error("Model not recognized: '{0}'")]
    UnknownModel(String),

    /// Two genotypes that must share a length do not.
    #[error("Genotype length mismatch: expected {expected} loci, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// A distribution parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] TransmissionError),
}
