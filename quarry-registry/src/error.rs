//! Error types for the registry crate

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Index already exists (cannot create)
    #[error("Index already exists: {0}")]
    IndexAlreadyExists(String),

    /// Index not found
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Name is taken by the other namespace (index vs. alias)
    #[error("Name conflict: {0} is already in use")]
    NameConflict(String),

    /// Alias not found
    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    /// Name fails validation
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName {
        /// The offending name
        name: String,
        /// Which rule it broke
        reason: String,
    },
}

impl RegistryError {
    /// Create an index already exists error
    pub fn index_already_exists(name: impl Into<String>) -> Self {
        Self::IndexAlreadyExists(name.into())
    }

    /// Create an index not found error
    pub fn index_not_found(name: impl Into<String>) -> Self {
        Self::IndexNotFound(name.into())
    }

    /// Create a name conflict error
    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::NameConflict(name.into())
    }

    /// Create an alias not found error
    pub fn alias_not_found(name: impl Into<String>) -> Self {
        Self::AliasNotFound(name.into())
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
