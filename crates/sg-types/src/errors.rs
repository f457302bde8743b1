use thiserror::Error;

use crate::config::Configuration;

/// Error currency at the model/scorer seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for SweepGrid operations.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("Evaluation failed for configuration [{configuration}]")]
    Evaluation {
        configuration: Configuration,
        #[source]
        source: BoxError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parameter-space violations, detected before any scoring call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Parameter space is empty")]
    EmptySpace,

    #[error("Parameter {name} has no candidate values")]
    EmptyAxis { name: String },

    #[error("Duplicate parameter name: {name}")]
    DuplicateName { name: String },

    #[error("Grid size overflows usize")]
    GridOverflow,
}

/// Result type alias for SweepGrid operations.
pub type SweepResult<T> = Result<T, SweepError>;
