//! Core resolver implementation.
//!
//! This module contains [`RoleHierarchyResolver`], which owns the role and
//! user catalogs and answers "who reports to this user, directly or
//! transitively?".
//!
//! # Lifecycle
//!
//! Load roles, load users, then query as often as needed. Every roles load
//! replaces the catalog and rebuilds whatever the selected strategy derives
//! from it; a rejected load leaves the previous catalog in effect.
//!
//! # Results
//!
//! Queries never fail. An unknown user, a user without subordinates and an
//! empty catalog all yield an empty list. Use [`RoleHierarchyResolver::find_user`]
//! to tell an unknown user apart from one with nobody below them.
//!
//! # Thread Safety
//!
//! Loads take `&mut self` and queries `&self`, so a resolver cannot be
//! reloaded while a query runs. Share one across tasks through
//! `AsyncRoleHierarchyResolver` (requires the `async` feature).

#[cfg(feature = "audit")]
use log::{debug, info, warn};

use crate::{
    error::Result,
    hierarchy::{RoleCatalog, DEFAULT_MAX_HIERARCHY_DEPTH},
    metrics::ResolverMetrics,
    role::{Role, RoleId},
    storage::CatalogSource,
    strategy::{Strategy, SubordinateStrategy},
    user::{User, UserId},
};
use std::collections::HashSet;
use std::time::Instant;

/// Configuration for the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Algorithm used to find descendant roles.
    pub strategy: Strategy,
    /// Maximum number of roles in a single parent chain. Unbounded by default.
    pub max_hierarchy_depth: usize,
    /// Whether to record metrics.
    pub enable_metrics: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Eager,
            max_hierarchy_depth: DEFAULT_MAX_HIERARCHY_DEPTH,
            enable_metrics: true,
        }
    }
}

/// Builder for creating resolver configurations.
///
/// # Example
/// ```rust
/// use user_hierarchy::{ResolverConfigBuilder, Strategy};
///
/// let config = ResolverConfigBuilder::new()
///     .strategy(Strategy::Lazy)
///     .max_depth(32)
///     .enable_metrics(false)
///     .build();
///
/// assert_eq!(config.strategy, Strategy::Lazy);
/// ```
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descendant-resolution strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Select the lazy strategy when `use_recursive` is true.
    pub fn recursive(self, use_recursive: bool) -> Self {
        self.strategy(Strategy::from_recursive_flag(use_recursive))
    }

    /// Reject catalogs with a parent chain longer than `depth` roles.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_hierarchy_depth = depth;
        self
    }

    /// Enable or disable metrics.
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}

/// Resolves the subordinates of users from a role tree.
#[derive(Debug)]
pub struct RoleHierarchyResolver {
    config: ResolverConfig,
    roles: RoleCatalog,
    users: Vec<User>,
    strategy: Box<dyn SubordinateStrategy>,
    metrics: ResolverMetrics,
}

impl RoleHierarchyResolver {
    /// Create a resolver. `use_recursive` selects the lazy strategy; otherwise
    /// descendants are precomputed when roles are loaded.
    pub fn new(use_recursive: bool) -> Self {
        Self::with_config(
            ResolverConfigBuilder::new()
                .recursive(use_recursive)
                .build(),
        )
    }

    /// Create a resolver with a custom configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        let strategy = config.strategy.build();
        Self::with_strategy(strategy, config)
    }

    /// Create a resolver around a caller-provided strategy implementation.
    ///
    /// `config.strategy` is overwritten with the strategy's own kind.
    pub fn with_strategy(strategy: Box<dyn SubordinateStrategy>, mut config: ResolverConfig) -> Self {
        config.strategy = strategy.kind();
        Self {
            config,
            roles: RoleCatalog::default(),
            users: Vec::new(),
            strategy,
            metrics: ResolverMetrics::new(),
        }
    }

    /// Replace the role catalog with a copy of `roles`.
    ///
    /// The catalog is validated first (unique nonzero ids, existing parents,
    /// no cycles, and the configured depth limit if any). On success the strategy rebuilds from the
    /// new catalog; on failure nothing changes.
    pub fn set_roles(&mut self, roles: &[Role]) -> Result<()> {
        let catalog = match RoleCatalog::with_max_depth(roles, self.config.max_hierarchy_depth) {
            Ok(catalog) => catalog,
            Err(e) => {
                #[cfg(feature = "audit")]
                warn!("Rejected role catalog of {} roles: {}", roles.len(), e);

                if self.config.enable_metrics {
                    self.metrics.record_error(e.kind());
                }
                return Err(e);
            }
        };

        self.strategy.rebuild(&catalog);
        self.roles = catalog;

        if self.config.enable_metrics {
            self.metrics.record_role_load();
        }

        #[cfg(feature = "audit")]
        info!(
            "Loaded {} roles (max depth {}), {} strategy rebuilt",
            self.roles.len(),
            self.roles.max_depth(),
            self.strategy.kind()
        );

        Ok(())
    }

    /// Replace the user catalog with a copy of `users`.
    pub fn set_users(&mut self, users: &[User]) {
        self.users = users.to_vec();

        if self.config.enable_metrics {
            self.metrics.record_user_load();
        }

        #[cfg(feature = "audit")]
        info!("Loaded {} users", self.users.len());
    }

    /// Load roles from a JSON value, which must be an array of roles.
    #[cfg(feature = "persistence")]
    pub fn set_roles_json(&mut self, value: &serde_json::Value) -> Result<()> {
        let roles = crate::storage::roles_from_value(value)?;
        self.set_roles(&roles)
    }

    /// Load users from a JSON value, which must be an array of users.
    #[cfg(feature = "persistence")]
    pub fn set_users_json(&mut self, value: &serde_json::Value) -> Result<()> {
        let users = crate::storage::users_from_value(value)?;
        self.set_users(&users);
        Ok(())
    }

    /// Load roles, then users, from a catalog source.
    pub fn load_from<S: CatalogSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let roles = source.roles()?;
        let users = source.users()?;
        self.set_roles(&roles)?;
        self.set_users(&users);
        Ok(())
    }

    /// All users whose role sits below the role of `user_id`, in catalog
    /// order.
    ///
    /// Returns an empty list when the user is unknown or has no subordinates.
    pub fn get_subordinates(&self, user_id: UserId) -> Vec<User> {
        let started = self.config.enable_metrics.then(Instant::now);

        let subordinates = match self.role_of(user_id) {
            Some(role) => {
                let descendants = self.strategy.descendant_roles(&self.roles, role);
                self.users_in_roles(&descendants)
            }
            None => Vec::new(),
        };

        if let Some(started) = started {
            self.metrics
                .record_query(started.elapsed(), subordinates.len());
        }

        #[cfg(feature = "audit")]
        debug!(
            "Resolved {} subordinates for user {} ({} strategy)",
            subordinates.len(),
            user_id,
            self.strategy.kind()
        );

        subordinates
    }

    /// All descendant roles of `role` under the active strategy.
    pub fn descendant_roles(&self, role: RoleId) -> HashSet<RoleId> {
        self.strategy
            .descendant_roles(&self.roles, role)
            .into_owned()
    }

    /// The first user with this id.
    pub fn find_user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == user_id)
    }

    /// Role of the first user with this id.
    pub fn role_of(&self, user_id: UserId) -> Option<RoleId> {
        self.find_user(user_id).map(User::role)
    }

    fn users_in_roles(&self, roles: &HashSet<RoleId>) -> Vec<User> {
        if roles.is_empty() {
            return Vec::new();
        }

        self.users
            .iter()
            .filter(|user| roles.contains(&user.role()))
            .cloned()
            .collect()
    }

    /// The loaded role catalog.
    pub fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    /// The loaded users, in catalog order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The active strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy.kind()
    }

    /// The resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Metrics recorded by this resolver.
    pub fn metrics(&self) -> &ResolverMetrics {
        &self.metrics
    }
}

impl Default for RoleHierarchyResolver {
    fn default() -> Self {
        Self::with_config(ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, storage::MemorySource, strategy::LazyStrategy};

    fn roles() -> Vec<Role> {
        vec![
            Role::root(1),
            Role::new(2, 1),
            Role::new(3, 2),
            Role::new(4, 3),
            Role::new(5, 3),
        ]
    }

    fn users() -> Vec<User> {
        vec![
            User::new(1, "Carl CEO", 1),
            User::new(2, "Emily Employee", 4),
            User::new(3, "Sam Supervisor", 3),
            User::new(4, "Mary Manager", 2),
            User::new(5, "Steve Trainer", 5),
        ]
    }

    fn loaded(use_recursive: bool) -> RoleHierarchyResolver {
        let mut resolver = RoleHierarchyResolver::new(use_recursive);
        resolver.set_roles(&roles()).unwrap();
        resolver.set_users(&users());
        resolver
    }

    fn ids(users: &[User]) -> Vec<UserId> {
        users.iter().map(User::id).collect()
    }

    #[test]
    fn test_flag_selects_strategy() {
        assert_eq!(RoleHierarchyResolver::new(true).strategy(), Strategy::Lazy);
        assert_eq!(RoleHierarchyResolver::new(false).strategy(), Strategy::Eager);
        assert_eq!(RoleHierarchyResolver::default().strategy(), Strategy::Eager);
    }

    #[test]
    fn test_results_keep_catalog_order() {
        for use_recursive in [false, true] {
            let resolver = loaded(use_recursive);
            assert_eq!(ids(&resolver.get_subordinates(1)), vec![2, 3, 4, 5]);
            assert_eq!(ids(&resolver.get_subordinates(4)), vec![2, 3, 5]);
            assert!(resolver.get_subordinates(2).is_empty());
        }
    }

    #[test]
    fn test_caller_mutation_does_not_leak_in() {
        let mut roles = roles();
        let mut users = users();
        let mut resolver = RoleHierarchyResolver::new(false);
        resolver.set_roles(&roles).unwrap();
        resolver.set_users(&users);

        roles.push(Role::new(6, 5));
        users.push(User::new(6, "Tina Trainee", 6));

        assert_eq!(resolver.roles().len(), 5);
        assert_eq!(ids(&resolver.get_subordinates(3)), vec![2, 5]);
    }

    #[test]
    fn test_reloading_roles_rebuilds_index() {
        let mut resolver = loaded(false);
        assert_eq!(ids(&resolver.get_subordinates(3)), vec![2, 5]);

        // Trainer moves up to report to the manager.
        resolver
            .set_roles(&[
                Role::root(1),
                Role::new(2, 1),
                Role::new(3, 2),
                Role::new(4, 3),
                Role::new(5, 2),
            ])
            .unwrap();

        assert_eq!(ids(&resolver.get_subordinates(3)), vec![2]);
        assert_eq!(resolver.descendant_roles(2), HashSet::from([3, 4, 5]));
    }

    #[test]
    fn test_rejected_roles_keep_previous_state() {
        let mut resolver = loaded(false);

        let err = resolver
            .set_roles(&[Role::new(1, 2), Role::new(2, 1)])
            .unwrap_err();

        assert!(matches!(err, Error::CircularDependency(_)));
        assert_eq!(resolver.roles().len(), 5);
        assert_eq!(ids(&resolver.get_subordinates(3)), vec![2, 5]);
        assert_eq!(
            resolver.metrics().summary().error_counts.get("circular_dependency"),
            Some(&1)
        );
    }

    #[test]
    fn test_users_without_known_role_have_no_subordinates() {
        for use_recursive in [false, true] {
            let mut resolver = loaded(use_recursive);
            let mut users = users();
            users.push(User::new(7, "Rooted", 0));
            users.push(User::new(8, "Orphan", 42));
            resolver.set_users(&users);

            assert!(resolver.get_subordinates(7).is_empty());
            assert!(resolver.get_subordinates(8).is_empty());
            // And nobody ever finds them as subordinates.
            assert_eq!(ids(&resolver.get_subordinates(1)), vec![2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_duplicate_user_ids_use_first_match() {
        let mut resolver = loaded(true);
        resolver.set_users(&[
            User::new(1, "Carl CEO", 3),
            User::new(1, "Shadow", 1),
            User::new(2, "Emily Employee", 4),
        ]);

        assert_eq!(resolver.role_of(1), Some(3));
        assert_eq!(ids(&resolver.get_subordinates(1)), vec![2]);
    }

    #[test]
    fn test_find_user_distinguishes_unknown_users() {
        let resolver = loaded(false);

        assert!(resolver.get_subordinates(2).is_empty());
        assert!(resolver.find_user(2).is_some());

        assert!(resolver.get_subordinates(999).is_empty());
        assert!(resolver.find_user(999).is_none());
    }

    #[test]
    fn test_max_depth_from_config() {
        let config = ResolverConfigBuilder::new().max_depth(2).build();
        let mut resolver = RoleHierarchyResolver::with_config(config);

        let err = resolver.set_roles(&roles()).unwrap_err();
        assert!(matches!(err, Error::MaxDepthExceeded(2)));
        assert!(resolver.roles().is_empty());
    }

    #[test]
    fn test_load_from_source() {
        let source = MemorySource::new().with_roles(roles()).with_users(users());
        let mut resolver = RoleHierarchyResolver::new(true);

        resolver.load_from(&source).unwrap();

        assert_eq!(resolver.users().len(), 5);
        assert_eq!(ids(&resolver.get_subordinates(3)), vec![2, 5]);
    }

    #[test]
    fn test_custom_strategy_overrides_config() {
        let config = ResolverConfigBuilder::new().strategy(Strategy::Eager).build();
        let resolver = RoleHierarchyResolver::with_strategy(Box::new(LazyStrategy::new()), config);

        assert_eq!(resolver.strategy(), Strategy::Lazy);
        assert_eq!(resolver.config().strategy, Strategy::Lazy);
    }

    #[test]
    fn test_metrics_track_loads_and_queries() {
        let resolver = loaded(false);
        resolver.get_subordinates(3);
        resolver.get_subordinates(999);

        let summary = resolver.metrics().summary();
        assert_eq!(summary.role_loads, 1);
        assert_eq!(summary.user_loads, 1);
        assert_eq!(summary.queries, 2);
        assert_eq!(summary.empty_results, 1);
    }

    #[test]
    fn test_metrics_can_be_disabled() {
        let config = ResolverConfigBuilder::new().enable_metrics(false).build();
        let mut resolver = RoleHierarchyResolver::with_config(config);
        resolver.set_roles(&roles()).unwrap();
        resolver.get_subordinates(1);

        let summary = resolver.metrics().summary();
        assert_eq!(summary.role_loads, 0);
        assert_eq!(summary.queries, 0);
        assert!(summary.query_durations.is_empty());
    }

    #[test]
    fn test_default_resolver_accepts_long_chains() {
        let chain: Vec<Role> = (1..=300).map(|id| Role::new(id, id - 1)).collect();
        let staff = vec![User::new(1, "Top", 1), User::new(2, "Bottom", 300)];

        for use_recursive in [false, true] {
            let mut resolver = RoleHierarchyResolver::new(use_recursive);
            resolver.set_roles(&chain).unwrap();
            resolver.set_users(&staff);

            assert_eq!(resolver.roles().max_depth(), 300);
            assert_eq!(ids(&resolver.get_subordinates(1)), vec![2]);
            assert_eq!(resolver.descendant_roles(1).len(), 299);
        }
    }

    #[test]
    fn test_lazy_resolver_handles_very_deep_chain() {
        let chain: Vec<Role> = (1..=200_000).map(|id| Role::new(id, id - 1)).collect();
        let mut resolver = RoleHierarchyResolver::new(true);
        resolver.set_roles(&chain).unwrap();
        resolver.set_users(&[User::new(1, "Top", 1), User::new(2, "Bottom", 200_000)]);

        assert_eq!(ids(&resolver.get_subordinates(1)), vec![2]);
        assert!(resolver.get_subordinates(2).is_empty());
    }
}
