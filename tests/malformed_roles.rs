//! Role catalogs that do not form a forest are rejected on load.

use user_hierarchy::{roles, users, Error, ResolverConfigBuilder, Role, RoleHierarchyResolver};

fn loaded(use_recursive: bool) -> RoleHierarchyResolver {
    let mut resolver = RoleHierarchyResolver::new(use_recursive);
    resolver.set_roles(&roles![1 => 0, 2 => 1, 3 => 2]).unwrap();
    resolver.set_users(&users![
        1, "Carl CEO" => 1;
        2, "Mary Manager" => 2;
        3, "Sam Supervisor" => 3;
    ]);
    resolver
}

#[test]
fn test_cycle_is_rejected() {
    for use_recursive in [false, true] {
        let mut resolver = loaded(use_recursive);

        let err = resolver
            .set_roles(&roles![1 => 3, 2 => 1, 3 => 2])
            .unwrap_err();

        assert!(matches!(err, Error::CircularDependency(_)));
    }
}

#[test]
fn test_cycle_below_a_valid_tree_is_rejected() {
    let mut resolver = RoleHierarchyResolver::new(false);

    let err = resolver
        .set_roles(&roles![1 => 0, 2 => 1, 3 => 4, 4 => 3])
        .unwrap_err();

    assert!(matches!(err, Error::CircularDependency(_)));
}

#[test]
fn test_self_parent_is_rejected() {
    let mut resolver = RoleHierarchyResolver::new(true);

    let err = resolver.set_roles(&[Role::new(5, 5)]).unwrap_err();

    assert!(matches!(err, Error::CircularDependency(5)));
}

#[test]
fn test_dangling_parent_is_rejected() {
    let mut resolver = RoleHierarchyResolver::new(false);

    let err = resolver.set_roles(&roles![1 => 0, 2 => 7]).unwrap_err();

    assert!(matches!(err, Error::ParentNotFound { role: 2, parent: 7 }));
}

#[test]
fn test_duplicate_role_is_rejected() {
    let mut resolver = RoleHierarchyResolver::new(false);

    let err = resolver.set_roles(&roles![1 => 0, 2 => 1, 2 => 0]).unwrap_err();

    assert!(matches!(err, Error::RoleAlreadyExists(2)));
}

#[test]
fn test_reserved_root_id_is_rejected() {
    let mut resolver = RoleHierarchyResolver::new(false);

    let err = resolver.set_roles(&roles![0 => 0]).unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_depth_limit() {
    let chain: Vec<Role> = (1..=10).map(|id| Role::new(id, id - 1)).collect();

    let mut shallow =
        RoleHierarchyResolver::with_config(ResolverConfigBuilder::new().max_depth(9).build());
    assert!(matches!(
        shallow.set_roles(&chain),
        Err(Error::MaxDepthExceeded(9))
    ));

    let mut deep =
        RoleHierarchyResolver::with_config(ResolverConfigBuilder::new().max_depth(10).build());
    deep.set_roles(&chain).unwrap();
    assert_eq!(deep.descendant_roles(1).len(), 9);
}

#[test]
fn test_rejected_load_keeps_previous_catalog() {
    for use_recursive in [false, true] {
        let mut resolver = loaded(use_recursive);

        assert!(resolver.set_roles(&roles![1 => 0, 2 => 9]).is_err());

        let ids: Vec<u64> = resolver.get_subordinates(1).iter().map(|u| u.id()).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(resolver.roles().len(), 3);
    }
}
