//! Error types for the spend_oracle crate

use thiserror::Error;

/// Custom error types for the spend_oracle crate
#[derive(Debug, Error)]
pub enum OracleError {
    /// Not enough transaction history to work with
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Malformed or empty requested date range
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The underlying forecaster errored or returned degenerate output
    #[error("Forecaster failure: {0}")]
    ForecasterFailure(String),

    /// An external collaborator (transaction store, model runtime) cannot be reached
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, OracleError>;
