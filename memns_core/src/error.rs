//! Error types for memns_core.

use thiserror::Error;

/// Result type alias using memns_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during namespace operations.
///
/// Every operation either completes or fails before mutating anything, so
/// receiving one of these means the tree is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Target name is occupied by an incompatible entry.
    #[error("Name conflict: {name}")]
    NameConflict { name: String },

    /// Relink would discard a directory that still has entries.
    #[error("Directory not empty: {name}")]
    NotEmpty { name: String },

    /// Relink would move a directory into itself or one of its descendants.
    #[error("Cannot move directory {name} into its own subtree")]
    CycleError { name: String },

    /// Name or path segment does not exist.
    #[error("Not found: {name}")]
    NotFound { name: String },

    /// Path traversal tried to descend through a file.
    #[error("Not a directory: {name}")]
    NotADirectory { name: String },

    /// Path string is not absolute.
    #[error("Invalid path: {path} (must begin with '/')")]
    InvalidPath { path: String },

    /// Entry name is reserved or malformed.
    #[error("Invalid name: {name:?} ({reason})")]
    InvalidName { name: String, reason: String },

    /// Self-parented directories are fixed points and cannot be moved.
    #[error("Cannot relink self-parented directory {name:?}")]
    RootImmovable { name: String },

    /// Entry already lives in a directory.
    #[error("Entry is already attached: {name}")]
    AlreadyAttached { name: String },
}

impl Error {
    /// Create a NameConflict error.
    pub fn name_conflict(name: impl Into<String>) -> Self {
        Error::NameConflict { name: name.into() }
    }

    /// Create a NotEmpty error.
    pub fn not_empty(name: impl Into<String>) -> Self {
        Error::NotEmpty { name: name.into() }
    }

    /// Create a CycleError error.
    pub fn cycle(name: impl Into<String>) -> Self {
        Error::CycleError { name: name.into() }
    }

    /// Create a NotFound error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Error::NotFound { name: name.into() }
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(name: impl Into<String>) -> Self {
        Error::NotADirectory { name: name.into() }
    }

    /// Create an InvalidPath error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Error::InvalidPath { path: path.into() }
    }

    /// Create an InvalidName error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a RootImmovable error.
    pub fn root_immovable(name: impl Into<String>) -> Self {
        Error::RootImmovable { name: name.into() }
    }

    /// Create an AlreadyAttached error.
    pub fn already_attached(name: impl Into<String>) -> Self {
        Error::AlreadyAttached { name: name.into() }
    }
}
