//! Interchangeable descendant-resolution strategies.
//!
//! The resolver holds one [`SubordinateStrategy`] chosen at construction and
//! never branches on the strategy kind itself.

use crate::{
    error::{Error, Result},
    hierarchy::{self, DescendantIndex, RoleCatalog},
    role::RoleId,
};
use std::{borrow::Cow, collections::HashSet, fmt, str::FromStr};

/// Which algorithm answers descendant queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persistence", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Precompute every role's descendants when roles are loaded.
    #[default]
    Eager,
    /// Walk the role tree on every query.
    Lazy,
}

impl Strategy {
    /// Map the "use the recursive solution" flag to a strategy.
    pub fn from_recursive_flag(use_recursive: bool) -> Self {
        if use_recursive {
            Strategy::Lazy
        } else {
            Strategy::Eager
        }
    }

    /// Create a fresh, empty implementation of this strategy.
    pub fn build(self) -> Box<dyn SubordinateStrategy> {
        match self {
            Strategy::Eager => Box::new(EagerStrategy::new()),
            Strategy::Lazy => Box::new(LazyStrategy::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Eager => write!(f, "eager"),
            Strategy::Lazy => write!(f, "lazy"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" | "precomputed" => Ok(Strategy::Eager),
            "lazy" | "recursive" => Ok(Strategy::Lazy),
            other => Err(Error::InvalidArgument(format!(
                "unknown strategy '{other}' (expected 'eager' or 'lazy')"
            ))),
        }
    }
}

/// Answers "which roles sit below this one?" for a loaded catalog.
pub trait SubordinateStrategy: fmt::Debug + Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> Strategy;

    /// Called after every roles load with the new catalog.
    fn rebuild(&mut self, catalog: &RoleCatalog);

    /// All descendants of `role`. Roles outside the catalog have none.
    fn descendant_roles<'a>(
        &'a self,
        catalog: &RoleCatalog,
        role: RoleId,
    ) -> Cow<'a, HashSet<RoleId>>;
}

/// Serves queries from a [`DescendantIndex`] built at load time.
#[derive(Debug, Clone, Default)]
pub struct EagerStrategy {
    index: DescendantIndex,
}

impl EagerStrategy {
    /// Create an eager strategy with an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current descendant index.
    pub fn index(&self) -> &DescendantIndex {
        &self.index
    }
}

impl SubordinateStrategy for EagerStrategy {
    fn kind(&self) -> Strategy {
        Strategy::Eager
    }

    fn rebuild(&mut self, catalog: &RoleCatalog) {
        self.index = DescendantIndex::build(catalog);
    }

    fn descendant_roles<'a>(
        &'a self,
        _catalog: &RoleCatalog,
        role: RoleId,
    ) -> Cow<'a, HashSet<RoleId>> {
        match self.index.descendants_of(role) {
            Some(descendants) => Cow::Borrowed(descendants),
            None => Cow::Owned(HashSet::new()),
        }
    }
}

/// Walks the catalog downward on every query. Keeps no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyStrategy;

impl LazyStrategy {
    /// Create a lazy strategy.
    pub fn new() -> Self {
        Self
    }
}

impl SubordinateStrategy for LazyStrategy {
    fn kind(&self) -> Strategy {
        Strategy::Lazy
    }

    fn rebuild(&mut self, _catalog: &RoleCatalog) {}

    fn descendant_roles<'a>(
        &'a self,
        catalog: &RoleCatalog,
        role: RoleId,
    ) -> Cow<'a, HashSet<RoleId>> {
        Cow::Owned(hierarchy::descendant_ids(catalog, role).into_iter().collect())
    }
}
