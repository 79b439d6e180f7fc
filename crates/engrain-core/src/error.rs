//! Error types for engrain-core

/// Result type for engrain-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during orchestration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No lock record exists for the requested document name.
    #[error("unknown document: {name} (run `engrain list` to see recorded documents)")]
    UnknownDocument { name: String },

    /// The lock file exists but cannot be parsed.
    #[error("failed to parse lock file at {path}: {message}")]
    LockfileParse { path: String, message: String },

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] engrain_fs::Error),

    #[error(transparent)]
    Git(#[from] engrain_git::Error),

    #[error(transparent)]
    Content(#[from] engrain_content::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
