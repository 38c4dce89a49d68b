//! Error types for envful operations.

use thiserror::Error;

/// A specialized `Result` type for envful operations.
pub type EnvResult<T> = Result<T, EnvError>;

/// Errors that can occur when loading, querying, or persisting environment
/// variables.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Failed to read or write an environment file.
    #[error("env file access failed for {path}")]
    Io {
        /// The path of the file that couldn't be accessed.
        path: String,
        /// The underlying I/O error, surfaced unchanged.
        #[source]
        source: std::io::Error,
    },

    /// Environment variable not found in the table.
    #[error("env var not found: {key}")]
    VarNotFound {
        /// The name of the variable that wasn't found.
        key: String,
    },

    /// A variable's value couldn't be converted to the requested type.
    #[error("failed to parse env var {key}={value}: {reason}")]
    ParseFailed {
        /// The name of the variable.
        key: String,
        /// The raw value that failed to convert.
        value: String,
        /// The reason for the failure.
        reason: String,
    },

    /// The environment table refused a set or unset operation.
    #[error("env table rejected {key}: {reason}")]
    TableRejected {
        /// The name of the variable involved.
        key: String,
        /// The reason for the refusal.
        reason: String,
    },
}
