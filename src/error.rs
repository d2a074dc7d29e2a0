//! Error types for the user hierarchy.

use crate::role::RoleId;
use thiserror::Error;

/// The main error type for user hierarchy operations.
///
/// Unknown users, users without subordinates and empty catalogs are not
/// errors: queries answer them with an empty result.
#[derive(Error, Debug)]
pub enum Error {
    /// A catalog or record had the wrong shape, e.g. a JSON object where an
    /// array of roles was expected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two roles in the same catalog share an id.
    #[error("Role '{0}' already exists")]
    RoleAlreadyExists(RoleId),

    /// A role names a parent that is not in the catalog.
    #[error("Role '{role}' references missing parent role '{parent}'")]
    ParentNotFound { role: RoleId, parent: RoleId },

    /// Following parent links from a role never reaches the root.
    #[error("Circular dependency detected in role hierarchy involving '{0}'")]
    CircularDependency(RoleId),

    /// Maximum role hierarchy depth exceeded.
    #[error("Maximum role hierarchy depth exceeded (max: {0})")]
    MaxDepthExceeded(usize),

    /// Serialization error.
    #[cfg(feature = "persistence")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a catalog source failed.
    #[error("Storage operation failed: {0}")]
    Storage(String),
}

impl Error {
    /// Short, stable name of the error kind, used as a metrics key.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "invalid_argument",
            Error::RoleAlreadyExists(_) => "role_already_exists",
            Error::ParentNotFound { .. } => "parent_not_found",
            Error::CircularDependency(_) => "circular_dependency",
            Error::MaxDepthExceeded(_) => "max_depth_exceeded",
            #[cfg(feature = "persistence")]
            Error::Serialization(_) => "serialization",
            Error::Storage(_) => "storage",
        }
    }
}

/// Result type alias for user hierarchy operations.
pub type Result<T> = std::result::Result<T, Error>;
