use super::*;
use crate::cache::TypeIdCache;
use crate::model::EntityInfo;
use crate::snapshot::SnapshotBuilder;
use symlens_host::{FixtureHost, Host, RawFlag};

#[test]
fn test_path_resolves_nested_packages() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let a = host.add_package(root, "a");
    let b_pkg = host.add_package(a, "b");
    host.add_class(b_pkg, "Parser");

    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    let info = b.package_info_from_path("a.b");
    assert_eq!(info.name, "b");
    assert_eq!(info.full_name, "a.b");
    assert_eq!(info.members.len(), 1);
    assert_eq!(info.members[0].name(), "Parser");
}

#[test]
fn test_partial_path_falls_back_to_last_resolved() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let a = host.add_package(root, "a");
    host.add_package(a, "b");

    let cache = TypeIdCache::new();
    let builder = SnapshotBuilder::new(&host, &cache);
    // Only `a.b` exists; the trailing `c` stops resolution at `b`.
    let info = builder.package_info_from_path("a.b.c");
    assert_eq!(info.name, "b");
    assert_eq!(info.full_name, "a.b");
}

#[test]
fn test_entirely_unresolved_path_is_nil() {
    let host = FixtureHost::new();
    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    let info = b.package_info_from_path("no.such.pkg");
    assert_eq!(info.name, "NA");
    assert!(info.members.is_empty());
}

#[test]
fn test_root_merges_placeholder_members() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let placeholder = host.placeholder_package();
    host.add_class(placeholder, "Orphan");
    host.add_package(root, "a");

    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    let info = b.package_info(root);
    let names: Vec<&str> = info.members.iter().map(|m| m.name()).collect();
    assert!(names.contains(&"Orphan"));
    assert!(names.contains(&"a"));
}

#[test]
fn test_synthetic_and_marked_members_are_filtered() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let pkg = host.add_package(root, "util");
    // Registers both the module and its synthetic `Fmt$` impl class.
    host.add_module(pkg, "Fmt");
    let hidden = host.add_class(pkg, "Hidden");
    host.set_synthetic(hidden);

    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    let info = b.package_info(pkg);
    let names: Vec<&str> = info.members.iter().map(|m| m.name()).collect();
    // The module shows (with its marker), its impl class and the
    // synthetic class do not.
    assert_eq!(names, vec!["Fmt$"]);
}

#[test]
fn test_type_less_members_are_filtered() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let pkg = host.add_package(root, "util");
    let bare = host.add_entity(pkg, "Broken");
    host.add_raw_flags(bare, &[RawFlag::Class]);

    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    let info = b.package_info(pkg);
    assert!(info.members.is_empty());
}

#[test]
fn test_members_sort_by_name() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let pkg = host.add_package(root, "util");
    host.add_class(pkg, "Zeta");
    host.add_class(pkg, "Alpha");
    host.add_package(pkg, "middle");

    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    let info = b.package_info(pkg);
    let names: Vec<&str> = info.members.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Alpha", "Zeta", "middle"]);
}

#[test]
fn test_child_packages_nest_recursively() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let a = host.add_package(root, "a");
    let b_pkg = host.add_package(a, "b");
    host.add_class(b_pkg, "Deep");

    let cache = TypeIdCache::new();
    let builder = SnapshotBuilder::new(&host, &cache);
    let info = builder.package_info(a);
    assert_eq!(info.members.len(), 1);
    let EntityInfo::Package(child) = &info.members[0] else {
        panic!("expected a nested package");
    };
    assert_eq!(child.full_name, "a.b");
    assert_eq!(child.members.len(), 1);
    assert_eq!(child.members[0].name(), "Deep");
}

#[test]
fn test_non_package_entity_yields_nil() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let class = host.add_class(root, "Parser");

    let cache = TypeIdCache::new();
    let b = SnapshotBuilder::new(&host, &cache);
    assert_eq!(b.package_info(class).name, "NA");
}

#[test]
fn test_normalized_entity_resolves_before_listing() {
    let mut host = FixtureHost::new();
    let cache = TypeIdCache::new();
    let root = host.root_package();
    host.add_package(root, "a");

    let b = SnapshotBuilder::new(&host, &cache);
    // The empty-package sentinel normalizes to the root.
    let info = b.package_info(host.empty_package());
    let names: Vec<&str> = info.members.iter().map(|m| m.name()).collect();
    assert!(names.contains(&"a"));
}
