use crate::parameters::{ParameterError, ParseError};
use thiserror::Error;

/// Error types for the algo-params library.
#[derive(Error, Debug)]
pub enum AlgoParamError {
    /// A parameter refused an operation.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A configuration line could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Parameter set lookup failed.
    #[error("Parameter set not found: {0}")]
    ParamSetNotFound(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for algo-params operations.
pub type Result<T> = std::result::Result<T, AlgoParamError>;

/// Extensions for converting from other error types.
impl From<String> for AlgoParamError {
    fn from(s: String) -> Self {
        AlgoParamError::Other(s)
    }
}

impl From<&str> for AlgoParamError {
    fn from(s: &str) -> Self {
        AlgoParamError::Other(s.to_string())
    }
}
