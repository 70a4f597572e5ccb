//! CLI-specific error types and exit codes.

use thiserror::Error;
use unopath_core::{ConfigError, DiscoveryError, UrlDecodeError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Discovery finished without finding an installation.
    #[error("No installation found")]
    NotFound,

    /// Discovery was interrupted.
    #[error("Interrupted")]
    Cancelled,

    /// Argument error not caught by the parser.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The discovery configuration built from flags is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A legacy location URL could not be decoded.
    #[error("Cannot decode URL: {0}")]
    Decode(#[from] UrlDecodeError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(String),

    /// Internal failure, such as a panicked worker.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: nothing found
    /// - 2: invalid arguments
    /// - 64-78: sysexits.h categories
    /// - 130: interrupted by SIGINT
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Decode(_) => 65,   // EX_DATAERR
            Self::Internal(_) => 70, // EX_SOFTWARE
            Self::Output(_) => 74,   // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Cancelled => 130,
        }
    }
}

impl From<DiscoveryError> for CliError {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}
