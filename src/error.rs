//! Error taxonomy (§7): configuration failures, partitioning failures, and
//! the thin bootstrap layer that maps them to process exit codes.

use thiserror::Error;

/// A structural defect in the configuration document itself: missing
/// fields, wrong types, malformed JSON. Detected during deserialization.
#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error("failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A defect found only once the document is structurally valid: references
/// that don't resolve, out-of-range values, inconsistent worker counts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigSemanticError {
    #[error("simulationLength must be positive, got {0}")]
    NonPositiveHorizon(i64),
    #[error("neurons list must not be empty")]
    EmptyPopulation,
    #[error("io list must not be empty")]
    EmptyIoList,
    #[error("connection in neuron '{neuron}' references unknown neuron '{target}'")]
    DanglingConnection { neuron: String, target: String },
    #[error("io device '{0}' references unknown neuron '{1}'")]
    DanglingIoBinding(String, String),
    #[error("io device '{0}' has invalid type {1}, expected 0 or 1")]
    InvalidIoType(String, i64),
    #[error("duplicate neuron name '{0}'")]
    DuplicateNeuron(String),
}

/// Top-level configuration error, wrapping either stage.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] ConfigParseError),
    #[error(transparent)]
    Semantic(#[from] ConfigSemanticError),
}

/// Raised by the Partitioner when the worker count exceeds the neuron
/// count (§4.1). Handled separately from [`ConfigError`] because it exits
/// with status 0, not 1 (§6).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("worker count {workers} exceeds neuron count {neurons}; refusing to start")]
pub struct TooFewNeuronsError {
    pub neurons: usize,
    pub workers: usize,
}

/// The outcome `main` translates into a process exit code (§6).
#[derive(Debug)]
pub enum Outcome {
    /// The horizon was reached normally.
    Completed,
    /// The graceful "workers > neurons" refusal: exit 0, no messages sent.
    TooFewNeurons(TooFewNeuronsError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed => 0,
            Outcome::TooFewNeurons(_) => 0,
        }
    }
}
