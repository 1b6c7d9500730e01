use std::path::PathBuf;

use crate::version::VersionParseError;

pub type Result<T> = std::result::Result<T, PatchError>;

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("failed to read manifest {path}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundle '{bundle}' has an invalid {field}")]
    InvalidVersion {
        bundle: String,
        field: &'static str,
        #[source]
        source: VersionParseError,
    },

    #[error("bundle '{bundle}' maps a path outside its root: {path}")]
    UnsafePath { bundle: String, path: PathBuf },

    #[error("failed to back up {path} before applying '{bundle}'")]
    Backup {
        bundle: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {target} while applying '{bundle}'")]
    Copy {
        bundle: String,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan staging directory {path}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("installation directory {path} is not writable")]
    InstallRootUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("failed to serialize ledger")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to persist ledger to {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Joins an error with all of its sources, for logs and serialized results.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
