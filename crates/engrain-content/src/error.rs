//! Error types for engrain-content

/// Result type for engrain-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while injecting or removing blocks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target document has pre-existing content but no wrapper region.
    /// The injector never fabricates a wrapper into such a document; inject
    /// into an empty file to create one.
    #[error(
        "document at {path} has content but no engrain wrapper; \
         inject into an empty document to create one"
    )]
    MissingWrapper { path: String },

    /// A block with the requested name is already present.
    #[error("block \"{name}\" already exists in {path}; pass force to replace it")]
    AlreadyExists { name: String, path: String },

    /// Storage failure from the filesystem layer, propagated unmodified.
    #[error(transparent)]
    Fs(#[from] engrain_fs::Error),
}
