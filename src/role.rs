//! Role definitions.

use std::fmt;

/// Identifier of a role. `0` is reserved for the implicit root.
pub type RoleId = u64;

/// Parent id carried by top-level roles.
pub const ROOT_ROLE_ID: RoleId = 0;

/// A node in the organizational hierarchy.
///
/// A role only knows its parent; children and descendants are derived from
/// the catalog it is loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    /// Unique, nonzero identifier of the role.
    id: RoleId,
    /// Identifier of the parent role, or [`ROOT_ROLE_ID`] for a top-level role.
    parent: RoleId,
}

impl Role {
    /// Create a role reporting to `parent`.
    pub fn new(id: RoleId, parent: RoleId) -> Self {
        Self { id, parent }
    }

    /// Create a top-level role.
    pub fn root(id: RoleId) -> Self {
        Self::new(id, ROOT_ROLE_ID)
    }

    /// Get the role's identifier.
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Get the parent role's identifier.
    pub fn parent(&self) -> RoleId {
        self.parent
    }

    /// Check if this role sits directly under the implicit root.
    pub fn is_top_level(&self) -> bool {
        self.parent == ROOT_ROLE_ID
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role {} (parent {})", self.id, self.parent)
    }
}
