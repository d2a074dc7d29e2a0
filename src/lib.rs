//! # User Hierarchy
//!
//! This crate answers one question about an organization: given a user, who
//! reports to them, directly or through any number of intermediate roles?
//!
//! Roles form a forest: each role names a parent, and top-level roles name
//! the implicit root `0`. Every user holds exactly one role. The subordinates
//! of a user are all users whose role sits anywhere below theirs.
//!
//! ## Features
//!
//! - Two interchangeable strategies with identical results:
//!   - **eager**: every role's descendants are precomputed when roles load
//!   - **lazy**: the role tree is walked downward on each query
//! - Role catalogs are validated on load (duplicate ids, missing parents,
//!   cycles, and an optional depth limit) and a rejected load keeps the previous state
//! - JSON catalog loading (`persistence` feature)
//! - Lock-protected async wrapper for shared use (`async` feature)
//! - Load and query metrics
//!
//! ## Quick Start
//!
//! ```rust
//! use user_hierarchy::{roles, users, RoleHierarchyResolver};
//!
//! // `true` selects the lazy (recursive) strategy
//! let mut resolver = RoleHierarchyResolver::new(false);
//!
//! resolver.set_roles(&roles![1 => 0, 2 => 1, 3 => 2, 4 => 3, 5 => 3])?;
//! resolver.set_users(&users![
//!     1, "Carl CEO" => 1;
//!     2, "Emily Employee" => 4;
//!     3, "Sam Supervisor" => 3;
//!     4, "Mary Manager" => 2;
//!     5, "Steve Trainer" => 5;
//! ]);
//!
//! let mut subordinates = resolver.get_subordinates(3);
//! subordinates.sort_by_key(|user| user.id());
//!
//! let names: Vec<&str> = subordinates.iter().map(|user| user.name()).collect();
//! assert_eq!(names, ["Emily Employee", "Steve Trainer"]);
//!
//! // Unknown users simply have no subordinates.
//! assert!(resolver.get_subordinates(999).is_empty());
//! # Ok::<(), user_hierarchy::Error>(())
//! ```
//!
//! ## Audit Logging
//!
//! When the `audit` feature is enabled, catalog loads and queries are logged
//! through the `log` facade. To enable logging:
//!
//! ```rust,ignore
//! use user_hierarchy::init_audit_logger;
//!
//! // Initialize logging (must be called early in program execution)
//! init_audit_logger();
//!
//! // Configure log level through RUST_LOG environment variable:
//! // RUST_LOG=info,user_hierarchy=debug
//! ```
//!
//! The following events are logged:
//! - Role catalog loads and descendant rebuilds (info)
//! - Rejected role catalogs (warn)
//! - User catalog loads (info)
//! - Subordinate queries (debug)
//!

#[cfg(feature = "audit")]
pub fn init_audit_logger() {
    env_logger::init();
}

pub mod core;
pub mod error;
pub mod hierarchy;
pub mod macros;
pub mod metrics;
pub mod role;
pub mod storage;
pub mod strategy;
pub mod user;

#[cfg(feature = "async")]
pub mod async_support;

// Re-export main types for convenience
pub use crate::{
    core::{ResolverConfig, ResolverConfigBuilder, RoleHierarchyResolver},
    error::{Error, Result},
    hierarchy::{DescendantIndex, RoleCatalog, DEFAULT_MAX_HIERARCHY_DEPTH},
    metrics::{MetricsSummary, ResolverMetrics},
    role::{Role, RoleId, ROOT_ROLE_ID},
    storage::{CatalogSource, MemorySource},
    strategy::{EagerStrategy, LazyStrategy, Strategy, SubordinateStrategy},
    user::{User, UserId},
};

#[cfg(feature = "persistence")]
pub use crate::storage::FileSource;

#[cfg(feature = "async")]
pub use crate::async_support::AsyncRoleHierarchyResolver;
