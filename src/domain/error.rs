use std::io;

use thiserror::Error;

use crate::domain::abi::AbiError;
use crate::domain::address::FormatError;
use crate::domain::attestation::AttestationError;
use crate::domain::calldata::DecodeError;
use crate::domain::publication::PublishError;
use crate::domain::validation::ValidationReport;

/// Library-wide error type for agenda-publisher operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex address, hash or byte-string format violation.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The transaction could not be fetched from the RPC endpoint.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Transaction calldata could not be decoded into an agenda.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// ABI encoding or fragment failure.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Attestation format, ordering, freshness or recovery failure.
    #[error(transparent)]
    Attestation(#[from] AttestationError),

    /// No ABI fragment is known for an action's selector.
    #[error("No ABI fragment matches selector {selector} of action #{index}")]
    UnknownSelector { index: usize, selector: String },

    /// Metadata record is not publishable.
    #[error("Metadata failed validation: {}", .0.errors.join("; "))]
    ValidationFailed(ValidationReport),

    /// Publication workflow failure, tagged with the state it occurred in.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
