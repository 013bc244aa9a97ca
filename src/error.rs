//! Error types shared by the dispatcher, the handlers and the gateway.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::gateway::Operation;

/// Errors that can end an invocation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Usage(&'static str),

    #[error("Unknown command '{0}', expected 'create' or 'delete'")]
    UnknownCommand(String),

    #[error("Error opening config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error decoding config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config file {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("{operation} failed: {message}")]
    Aws { operation: Operation, message: String },

    #[error("{operation} timed out after {}s", .timeout.as_secs_f64())]
    Timeout {
        operation: Operation,
        timeout: Duration,
    },

    #[error("{0} returned no instance id")]
    MissingInstanceId(Operation),
}

impl Error {
    /// Wrap an SDK error (or anything displayable) for the given operation.
    pub fn aws<E: std::fmt::Display>(operation: Operation, err: E) -> Self {
        Error::Aws {
            operation,
            message: err.to_string(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::UnknownCommand(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
