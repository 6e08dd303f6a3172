//! Error types for sounder.
//!
//! Uses `thiserror` for ergonomic error definitions.
//!
//! Transport-level probe failures are deliberately absent here: they are
//! absorbed inside the probe and only ever surface as a "not open" result.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid invocation input, detected before any network activity starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("invalid port range: start ({start}) > end ({end})")]
    InvalidPortRange { start: u16, end: u16 },

    #[error("invalid port number: {0}")]
    InvalidPort(String),

    #[error("empty port specification")]
    EmptyPorts,

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("rate delay must be non-negative, got {0}")]
    NegativeRateDelay(f64),

    #[error("timeout must be positive, got {0}")]
    NonPositiveTimeout(f64),

    #[error("invalid target format: {0}")]
    InvalidTarget(String),

    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("CIDR range too large: {0} addresses (max: {1})")]
    CidrTooLarge(u128, u128),
}

/// Failures while persisting a scan report.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Invocation-level failures surfaced to the caller.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan was stopped by an external interrupt before completing.
    #[error("scan interrupted")]
    Interrupted,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
