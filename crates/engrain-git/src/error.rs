//! Error types for engrain-git

/// Result type for engrain-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching a source repository
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("ref not found in {url}: {reference}")]
    RefNotFound { url: String, reference: String },

    #[error(transparent)]
    Fs(#[from] engrain_fs::Error),

    #[error(transparent)]
    Git(#[from] git2::Error),
}
