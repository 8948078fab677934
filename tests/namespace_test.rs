//! Tests for building namespaces through the node operations

use fslca::domain::{Namespace, NodeKind, Resolver};

#[test]
fn given_new_file_when_created_then_is_detached_leaf() {
    let mut ns = Namespace::new();
    let a = ns.new_file("a");

    let node = ns.get(a).unwrap();
    assert_eq!(node.name(), "a");
    assert_eq!(node.parent(), None);
    assert!(node.children().is_empty());
    assert!(node.aliases().is_empty());
    assert_eq!(node.kind(), NodeKind::File);
    assert!(ns.root().is_none());
}

#[test]
fn given_soft_link_when_adding_alias_then_refused() {
    let mut ns = Namespace::new();
    let d = ns.new_file("d");
    let h = ns.new_link("h", d);
    let x = ns.new_file("x");

    assert!(!ns.add_alias(h, x, d));
    assert!(ns.get(h).unwrap().aliases().is_empty());
}

#[test]
fn given_node_with_alias_when_turning_into_link_then_refused() {
    let mut ns = Namespace::new();
    let a = ns.new_file("a");
    let b = ns.new_file("b");
    let x = ns.new_file("x");
    ns.add_alias(a, x, b);

    assert!(!ns.set_link(a, b));
    assert!(!ns.get(a).unwrap().is_link());
}

#[test]
fn given_attached_node_when_setting_as_root_then_refused() {
    let mut ns = Namespace::new();
    let root = ns.new_file("root");
    let a = ns.new_file("a");
    ns.add_child(root, a);

    assert!(!ns.set_root(a));
    assert!(ns.set_root(root));
    assert_eq!(ns.root(), Some(root));
}

#[test]
fn given_refused_child_when_querying_then_tree_is_unchanged() {
    let mut ns = Namespace::new();
    let root = ns.new_file("root");
    let d = ns.new_file("d");
    let h = ns.new_link("h", d);
    let orphan = ns.new_file("orphan");
    ns.add_child(root, d);
    ns.add_child(root, h);

    assert!(!ns.add_child(h, orphan));

    let resolver = Resolver::new(&ns);
    assert_eq!(resolver.find_file_by_name(Some(root), "orphan"), None);
    assert!(resolver.find_path(Some(root), Some(orphan)).is_err());
}

#[test]
fn given_alias_to_ancestor_when_resolving_then_returns_ancestor_without_altering_tree() {
    let mut ns = Namespace::new();
    let root = ns.new_file("root");
    let a = ns.new_file("a");
    let c = ns.new_file("c");
    ns.add_child(root, a);
    ns.add_child(a, c);
    let up = ns.new_file("up");
    ns.add_alias(c, up, root);

    let resolver = Resolver::new(&ns);

    assert_eq!(resolver.find_file_by_name(Some(c), "up"), Some(root));
    assert_eq!(ns.get(root).unwrap().parent(), None);
    assert_eq!(resolver.find_path(Some(root), Some(c)).unwrap(), vec![root, a, c]);
}
