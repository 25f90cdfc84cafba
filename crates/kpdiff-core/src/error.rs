//! Errors raised while loading a database snapshot.

use std::path::PathBuf;

/// Failure to produce a decoded snapshot from a file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("database file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key did not unlock the database (usually a wrong password).
    #[error("failed to unlock {}", path.display())]
    Unlock {
        path: PathBuf,
        #[source]
        source: keepass::error::DatabaseOpenError,
    },

    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: keepass::error::DatabaseOpenError,
    },
}
