//! Error types for the normalization core.
//!
//! None of these escape the pipeline: every failure ends as an absent field
//! or a passthrough document. They exist so internal helpers can use `?` and
//! so the reason can be logged.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("unrecognized artifact type: {0}")]
    UnrecognizedArtifactType(String),

    #[error("syslog line did not match any structured pattern: {0:?}")]
    SyslogParse(String),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;
