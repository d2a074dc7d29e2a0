//! Convenience macros for building catalogs.

/// Macro for creating a role catalog as `id => parent` pairs.
///
/// # Examples
///
/// ```rust
/// use user_hierarchy::roles;
///
/// let roles = roles![
///     1 => 0,
///     2 => 1,
///     3 => 2
/// ];
///
/// assert_eq!(roles.len(), 3);
/// assert!(roles[0].is_top_level());
/// ```
#[macro_export]
macro_rules! roles {
    ($($id:expr => $parent:expr),* $(,)?) => {
        vec![$(
            $crate::role::Role::new($id, $parent)
        ),*]
    };
}

/// Macro for creating a user catalog as `id, name => role` entries.
///
/// # Examples
///
/// ```rust
/// use user_hierarchy::users;
///
/// let users = users![
///     1, "Carl CEO" => 1;
///     3, "Sam Supervisor" => 3
/// ];
///
/// assert_eq!(users[1].name(), "Sam Supervisor");
/// ```
#[macro_export]
macro_rules! users {
    ($($id:expr, $name:expr => $role:expr);* $(;)?) => {
        vec![$(
            $crate::user::User::new($id, $name, $role)
        ),*]
    };
}
