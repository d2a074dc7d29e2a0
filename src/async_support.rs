//! Async support for the resolver (requires 'async' feature).

use crate::{
    core::RoleHierarchyResolver,
    error::Result,
    role::{Role, RoleId},
    storage::CatalogSource,
    strategy::Strategy,
    user::{User, UserId},
};
use std::{collections::HashSet, sync::Arc};
use tokio::sync::RwLock;

/// Shared, lock-protected resolver.
///
/// Loads take the write lock and queries the read lock, so a reload never
/// interleaves with a query. Clones share the same resolver.
///
/// # Example
/// ```rust
/// use user_hierarchy::{roles, users, AsyncRoleHierarchyResolver, RoleHierarchyResolver};
///
/// # tokio_test::block_on(async {
/// let resolver = AsyncRoleHierarchyResolver::new(RoleHierarchyResolver::new(true));
/// resolver.set_roles(&roles![1 => 0, 2 => 1]).await?;
/// resolver.set_users(&users![10, "Boss" => 1; 11, "Report" => 2]).await;
///
/// assert_eq!(resolver.get_subordinates(10).await.len(), 1);
/// # Ok::<(), user_hierarchy::Error>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct AsyncRoleHierarchyResolver {
    inner: Arc<RwLock<RoleHierarchyResolver>>,
}

impl AsyncRoleHierarchyResolver {
    /// Wrap a resolver.
    pub fn new(resolver: RoleHierarchyResolver) -> Self {
        Self {
            inner: Arc::new(RwLock::new(resolver)),
        }
    }

    /// Replace the role catalog.
    pub async fn set_roles(&self, roles: &[Role]) -> Result<()> {
        let mut resolver = self.inner.write().await;
        resolver.set_roles(roles)
    }

    /// Replace the user catalog.
    pub async fn set_users(&self, users: &[User]) {
        let mut resolver = self.inner.write().await;
        resolver.set_users(users);
    }

    /// Load roles and users from a source under a single write lock.
    pub async fn load_from<S: CatalogSource + ?Sized>(&self, source: &S) -> Result<()> {
        let mut resolver = self.inner.write().await;
        resolver.load_from(source)
    }

    /// All subordinates of a user.
    pub async fn get_subordinates(&self, user_id: UserId) -> Vec<User> {
        let resolver = self.inner.read().await;
        resolver.get_subordinates(user_id)
    }

    /// Subordinates of several users, resolved under one read lock.
    pub async fn batch_get_subordinates(&self, user_ids: &[UserId]) -> Vec<(UserId, Vec<User>)> {
        let resolver = self.inner.read().await;
        user_ids
            .iter()
            .map(|&user_id| (user_id, resolver.get_subordinates(user_id)))
            .collect()
    }

    /// All descendant roles of a role.
    pub async fn descendant_roles(&self, role: RoleId) -> HashSet<RoleId> {
        let resolver = self.inner.read().await;
        resolver.descendant_roles(role)
    }

    /// The first user with this id.
    pub async fn find_user(&self, user_id: UserId) -> Option<User> {
        let resolver = self.inner.read().await;
        resolver.find_user(user_id).cloned()
    }

    /// The active strategy.
    pub async fn strategy(&self) -> Strategy {
        self.inner.read().await.strategy()
    }

    /// Get a reference to the underlying resolver.
    pub fn inner(&self) -> &Arc<RwLock<RoleHierarchyResolver>> {
        &self.inner
    }
}
