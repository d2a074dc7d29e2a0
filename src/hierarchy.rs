//! Role catalog and descendant computation.
//!
//! A [`RoleCatalog`] is a validated, id-indexed copy of a flat role list.
//! Validation guarantees that every parent chain ends at the root, which is
//! what lets both descendant algorithms here terminate:
//!
//! - [`DescendantIndex::build`] walks every role's ancestor chain once and
//!   registers the role as a descendant of each ancestor.
//! - [`collect_descendants`] walks downward from one role on demand.
//!
//! For every role of a catalog the two produce the same set of ids.
use crate::{
    error::{Error, Result},
    role::{Role, RoleId, ROOT_ROLE_ID},
};
use std::collections::{HashMap, HashSet};

/// Default limit on the number of roles in a single parent chain: none.
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = usize::MAX;

/// A validated collection of roles forming a forest under the implicit root.
///
/// Construction rejects catalogs where a role uses the reserved id `0`, two
/// roles share an id, a parent is missing, or parent links loop. A depth
/// limit is only enforced when one is configured.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    positions: HashMap<RoleId, usize>,
    children: HashMap<RoleId, Vec<usize>>,
    depths: HashMap<RoleId, usize>,
}

impl RoleCatalog {
    /// Validate and copy `roles` using [`DEFAULT_MAX_HIERARCHY_DEPTH`].
    pub fn new(roles: &[Role]) -> Result<Self> {
        Self::with_max_depth(roles, DEFAULT_MAX_HIERARCHY_DEPTH)
    }

    /// Validate and copy `roles`, allowing chains of at most `max_depth` roles.
    pub fn with_max_depth(roles: &[Role], max_depth: usize) -> Result<Self> {
        let mut positions = HashMap::with_capacity(roles.len());
        for (position, role) in roles.iter().enumerate() {
            if role.id() == ROOT_ROLE_ID {
                return Err(Error::InvalidArgument(format!(
                    "role id {ROOT_ROLE_ID} is reserved for the root"
                )));
            }
            if positions.insert(role.id(), position).is_some() {
                return Err(Error::RoleAlreadyExists(role.id()));
            }
        }

        let mut children: HashMap<RoleId, Vec<usize>> = HashMap::new();
        for (position, role) in roles.iter().enumerate() {
            if !role.is_top_level() && !positions.contains_key(&role.parent()) {
                return Err(Error::ParentNotFound {
                    role: role.id(),
                    parent: role.parent(),
                });
            }
            children.entry(role.parent()).or_default().push(position);
        }

        let mut catalog = Self {
            roles: roles.to_vec(),
            positions,
            children,
            depths: HashMap::new(),
        };
        catalog.depths = catalog.compute_depths(max_depth)?;
        Ok(catalog)
    }

    /// Depth of every role (top-level roles have depth 1), detecting cycles.
    ///
    /// Each role is visited once: a climb stops at the root or at the first
    /// ancestor whose depth is already known.
    fn compute_depths(&self, max_depth: usize) -> Result<HashMap<RoleId, usize>> {
        let mut depths: HashMap<RoleId, usize> = HashMap::with_capacity(self.roles.len());
        let mut path = Vec::new();
        let mut on_path = HashSet::new();

        for role in &self.roles {
            path.clear();
            on_path.clear();

            let mut current = role.id();
            let mut depth = loop {
                if current == ROOT_ROLE_ID {
                    break 0;
                }
                if let Some(&known) = depths.get(&current) {
                    break known;
                }
                if !on_path.insert(current) {
                    return Err(Error::CircularDependency(current));
                }
                path.push(current);
                current = self.parent_of(current).unwrap_or(ROOT_ROLE_ID);
            };

            for id in path.drain(..).rev() {
                depth += 1;
                if depth > max_depth {
                    return Err(Error::MaxDepthExceeded(max_depth));
                }
                depths.insert(id, depth);
            }
        }

        Ok(depths)
    }

    /// Get a role by id.
    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.positions.get(&id).map(|&position| &self.roles[position])
    }

    /// Check if a role with this id is in the catalog.
    pub fn contains(&self, id: RoleId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Parent of the role with this id, if the role exists.
    pub fn parent_of(&self, id: RoleId) -> Option<RoleId> {
        self.get(id).map(Role::parent)
    }

    /// Direct children of a role, in catalog order.
    pub fn children_of(&self, id: RoleId) -> impl Iterator<Item = &Role> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |&position| &self.roles[position])
    }

    /// Number of roles on the chain from the root down to this role.
    pub fn depth_of(&self, id: RoleId) -> Option<usize> {
        self.depths.get(&id).copied()
    }

    /// Deepest chain in the catalog.
    pub fn max_depth(&self) -> usize {
        self.depths.values().copied().max().unwrap_or(0)
    }

    /// Iterate over the roles in the order they were loaded.
    pub fn iter(&self) -> impl Iterator<Item = &Role> + '_ {
        self.roles.iter()
    }

    /// The roles in the order they were loaded.
    pub fn as_slice(&self) -> &[Role] {
        &self.roles
    }

    /// Get the number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the catalog holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Precomputed mapping from every role to all of its descendants.
#[derive(Debug, Clone, Default)]
pub struct DescendantIndex {
    descendants: HashMap<RoleId, HashSet<RoleId>>,
}

impl DescendantIndex {
    /// Build the index from scratch.
    ///
    /// Every role starts with an empty set; each role is then added to the
    /// set of every ancestor on its parent chain.
    pub fn build(catalog: &RoleCatalog) -> Self {
        let mut descendants: HashMap<RoleId, HashSet<RoleId>> = catalog
            .iter()
            .map(|role| (role.id(), HashSet::new()))
            .collect();

        for role in catalog.iter() {
            let mut parent_id = role.parent();
            while parent_id != ROOT_ROLE_ID {
                descendants.entry(parent_id).or_default().insert(role.id());
                parent_id = catalog.parent_of(parent_id).unwrap_or(ROOT_ROLE_ID);
            }
        }

        Self { descendants }
    }

    /// All descendants of a role, or `None` for a role outside the catalog.
    pub fn descendants_of(&self, role: RoleId) -> Option<&HashSet<RoleId>> {
        self.descendants.get(&role)
    }

    /// Check if `role` sits anywhere below `ancestor`.
    pub fn is_descendant(&self, ancestor: RoleId, role: RoleId) -> bool {
        self.descendants
            .get(&ancestor)
            .is_some_and(|set| set.contains(&role))
    }

    /// Number of indexed roles.
    pub fn len(&self) -> usize {
        self.descendants.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }
}

/// Append every descendant of `role` to `collected`, walking downward.
///
/// Each child is pushed before its own subtree is visited, siblings in
/// catalog order. The walk keeps an explicit stack, so chain length is not
/// bounded by the thread stack.
pub fn collect_descendants(catalog: &RoleCatalog, role: RoleId, collected: &mut Vec<RoleId>) {
    let mut pending: Vec<RoleId> = catalog.children_of(role).map(Role::id).collect();
    pending.reverse();

    while let Some(child) = pending.pop() {
        collected.push(child);
        let siblings = pending.len();
        pending.extend(catalog.children_of(child).map(Role::id));
        pending[siblings..].reverse();
    }
}

/// Descendants of `role` found by walking downward.
///
/// Roles outside the catalog, including the root sentinel, have none.
pub fn descendant_ids(catalog: &RoleCatalog, role: RoleId) -> Vec<RoleId> {
    let mut collected = Vec::new();
    if catalog.contains(role) {
        collect_descendants(catalog, role, &mut collected);
    }
    collected
}
