//! Error types.
//!
//! Generation-time failures and runtime interop failures are kept apart:
//! the former abort work for one component (or the whole pass when the
//! manifest itself is unusable), the latter are surfaced through the
//! adapter's scheduled operations and never retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading metadata or writing generated files.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("component '{component}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { component: String, parameter: String },

    #[error("'{0}' is not a valid component name")]
    InvalidComponentName(String),

    #[error("could not copy runtime helper '{file}': {source}")]
    HelperCopy {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write component '{component}' to {path}: {source}")]
    Write {
        component: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// A rejection reported by the remote component-hosting runtime.
///
/// Clonable so that a single shared mount future can hand the same failure
/// to every continuation waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} rejected by remote host: {message}")]
pub struct InteropError {
    pub operation: RemoteOperation,
    pub message: String,
}

impl InteropError {
    pub fn new(operation: RemoteOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// The three calls that cross the interop boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    AddRootComponent,
    SetParameters,
    Dispose,
}

impl std::fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RemoteOperation::AddRootComponent => "addRootComponent",
            RemoteOperation::SetParameters => "setParameters",
            RemoteOperation::Dispose => "dispose",
        };
        f.write_str(name)
    }
}

/// Errors observed through an adapter's scheduled operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("mount of '{identifier}' failed: {source}")]
    Mount {
        identifier: String,
        #[source]
        source: InteropError,
    },

    #[error("parameter update of '{identifier}' failed: {source}")]
    Update {
        identifier: String,
        #[source]
        source: InteropError,
    },

    #[error("dispose of '{identifier}' failed: {source}")]
    Dispose {
        identifier: String,
        #[source]
        source: InteropError,
    },

    #[error("scheduled operation did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors from the component registration table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("identifier '{identifier}' is already registered for '{existing}'")]
    AlreadyRegistered { identifier: String, existing: String },
}
