//! User definitions (the people placed into the role hierarchy).

use crate::role::RoleId;
use std::fmt;

/// Identifier of a user.
pub type UserId = u64;

/// A user holds exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    /// Unique identifier for the user.
    id: UserId,
    /// Display name.
    name: String,
    /// The role this user is assigned to.
    role: RoleId,
}

impl User {
    /// Create a new user assigned to `role`.
    pub fn new(id: UserId, name: impl Into<String>, role: RoleId) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// Get the user's identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Get the user's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the role the user is assigned to.
    pub fn role(&self) -> RoleId {
        self.role
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {}, role {})", self.name, self.id, self.role)
    }
}
