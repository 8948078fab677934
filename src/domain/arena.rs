use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{instrument, warn};

/// Stable identity of a node inside a [`Namespace`].
///
/// Two ids compare equal only if they denote the same node; names play no role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// What a node is: a plain file/directory or a soft link forwarding to another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Link(NodeId),
}

/// Directory-scoped redirection: a lookup matching `alias`'s name yields `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub alias: NodeId,
    pub target: NodeId,
}

/// Tree vertex in the arena-based namespace.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    aliases: Vec<Alias>,
    kind: NodeKind,
}

impl Node {
    fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            aliases: Vec::new(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the parent node, None for roots and detached nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Alias table in insertion order
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, NodeKind::Link(_))
    }

    pub fn link_target(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Link(target) => Some(target),
            NodeKind::File => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena holding every node of one namespace.
///
/// Parent/child edges form a tree. Aliases and link targets are plain ids into
/// the same arena, so shortcuts anywhere in the tree need no shared ownership.
/// Nodes are never removed, which keeps every issued [`NodeId`] valid for the
/// lifetime of the namespace.
#[derive(Debug, Clone)]
pub struct Namespace {
    arena: Arena<Node>,
    root: Option<NodeId>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a detached leaf node.
    #[instrument(level = "trace", skip(self))]
    pub fn new_file(&mut self, name: &str) -> NodeId {
        NodeId(self.arena.insert(Node::new(name.to_string(), NodeKind::File)))
    }

    /// Creates a detached soft link forwarding to `target`.
    #[instrument(level = "trace", skip(self))]
    pub fn new_link(&mut self, name: &str, target: NodeId) -> NodeId {
        NodeId(
            self.arena
                .insert(Node::new(name.to_string(), NodeKind::Link(target))),
        )
    }

    /// Turns an existing node into a soft link.
    ///
    /// Only childless nodes without aliases can become links.
    #[instrument(level = "trace", skip(self))]
    pub fn set_link(&mut self, node: NodeId, target: NodeId) -> bool {
        if !self.contains(target) {
            warn!("Cannot link to unknown node {:?}", target);
            return false;
        }
        let Some(n) = self.arena.get_mut(node.0) else {
            warn!("Cannot turn unknown node {:?} into a soft link", node);
            return false;
        };
        if !n.children.is_empty() || !n.aliases.is_empty() {
            warn!("Cannot turn '{}' into a soft link: it has children or aliases", n.name);
            return false;
        }
        n.kind = NodeKind::Link(target);
        true
    }

    /// Attaches `child` below `parent`.
    ///
    /// Refused (logged, nothing mutated) when `parent` is a soft link, when `child`
    /// is already attached, or when `child` is `parent` itself or one of its ancestors.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.arena.get(parent.0) else {
            warn!("Cannot add a child to unknown node {:?}", parent);
            return false;
        };
        if parent_node.is_link() {
            warn!("Cannot add a child to a soft link: {}", parent_node.name);
            return false;
        }
        let Some(child_node) = self.arena.get(child.0) else {
            warn!("Cannot add unknown node {:?} as child", child);
            return false;
        };
        if child_node.parent.is_some() {
            warn!("Cannot add '{}': it already has a parent", child_node.name);
            return false;
        }
        if self.ancestors(parent).any(|a| a == child) {
            warn!("Cannot add '{}' below its own descendant", child_node.name);
            return false;
        }

        if let Some(c) = self.arena.get_mut(child.0) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.arena.get_mut(parent.0) {
            p.children.push(child);
        }
        true
    }

    /// Registers `alias -> target` on `owner`, replacing a previous mapping for the same alias node.
    #[instrument(level = "trace", skip(self))]
    pub fn add_alias(&mut self, owner: NodeId, alias: NodeId, target: NodeId) -> bool {
        if !self.contains(alias) || !self.contains(target) {
            warn!("Cannot register alias with unknown nodes {:?} -> {:?}", alias, target);
            return false;
        }
        let Some(o) = self.arena.get_mut(owner.0) else {
            warn!("Cannot add an alias to unknown node {:?}", owner);
            return false;
        };
        if o.is_link() {
            warn!("Cannot add an alias to a soft link: {}", o.name);
            return false;
        }
        match o.aliases.iter_mut().find(|a| a.alias == alias) {
            Some(existing) => existing.target = target,
            None => o.aliases.push(Alias { alias, target }),
        }
        true
    }

    /// Whether `owner` already carries an alias whose node is called `name`.
    pub fn has_alias_named(&self, owner: NodeId, name: &str) -> bool {
        self.get(owner).is_some_and(|o| {
            o.aliases
                .iter()
                .any(|a| self.name(a.alias) == Some(name))
        })
    }

    /// Designates the root used by default for queries.
    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, node: NodeId) -> bool {
        match self.get(node) {
            Some(n) if n.parent.is_none() => {
                self.root = Some(node);
                true
            }
            Some(n) => {
                warn!("Cannot use '{}' as root: it has a parent", n.name);
                false
            }
            None => {
                warn!("Cannot use unknown node {:?} as root", node);
                false
            }
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::name)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Walks from `node` up to the top of its parent chain, `node` first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            namespace: self,
            next: self.contains(node).then_some(node),
        }
    }

    /// Number of parent hops from `node` to the top of its chain.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, node: NodeId) -> Option<usize> {
        self.contains(node)
            .then(|| self.ancestors(node).count() - 1)
    }

    /// Structural pre-order walk below `start`: children only, no alias or link indirection.
    pub fn iter_from(&self, start: NodeId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, start)
    }

    /// Structural pre-order walk from the designated root.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        match self.root {
            Some(root) => PreOrderIterator::new(self, root),
            None => PreOrderIterator {
                namespace: self,
                stack: Vec::new(),
            },
        }
    }
}

pub struct Ancestors<'a> {
    namespace: &'a Namespace,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.namespace.get(current).and_then(Node::parent);
        Some(current)
    }
}

pub struct PreOrderIterator<'a> {
    namespace: &'a Namespace,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(namespace: &'a Namespace, start: NodeId) -> Self {
        Self {
            namespace,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.namespace.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_child_sets_parent_and_keeps_order() {
        let mut ns = Namespace::new();
        let root = ns.new_file("root");
        let a = ns.new_file("a");
        let b = ns.new_file("b");

        assert!(ns.add_child(root, a));
        assert!(ns.add_child(root, b));

        assert_eq!(ns.get(root).unwrap().children(), &[a, b]);
        assert_eq!(ns.get(a).unwrap().parent(), Some(root));
        assert_eq!(ns.get(root).unwrap().parent(), None);
    }

    #[test]
    fn test_add_child_to_link_is_refused() {
        let mut ns = Namespace::new();
        let d = ns.new_file("d");
        let h = ns.new_link("h", d);
        let x = ns.new_file("x");

        assert!(!ns.add_child(h, x));
        assert!(ns.get(h).unwrap().children().is_empty());
        assert_eq!(ns.get(x).unwrap().parent(), None);
    }

    #[test]
    fn test_add_child_refuses_cycles_and_reattachment() {
        let mut ns = Namespace::new();
        let root = ns.new_file("root");
        let a = ns.new_file("a");
        let other = ns.new_file("other");
        ns.add_child(root, a);

        assert!(!ns.add_child(a, root));
        assert!(!ns.add_child(a, a));
        assert!(!ns.add_child(other, a));
        assert_eq!(ns.get(a).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_add_alias_overwrites_same_key() {
        let mut ns = Namespace::new();
        let root = ns.new_file("root");
        let x = ns.new_file("x");
        let a = ns.new_file("a");
        let b = ns.new_file("b");

        assert!(ns.add_alias(root, x, a));
        assert!(ns.add_alias(root, x, b));

        assert_eq!(ns.get(root).unwrap().aliases(), &[Alias { alias: x, target: b }]);
        assert!(ns.has_alias_named(root, "x"));
        assert!(!ns.has_alias_named(root, "y"));
    }

    #[test]
    fn test_set_link_requires_childless_node() {
        let mut ns = Namespace::new();
        let a = ns.new_file("a");
        let c = ns.new_file("c");
        let d = ns.new_file("d");
        ns.add_child(a, c);

        assert!(!ns.set_link(a, d));
        assert!(ns.set_link(c, d));
        assert_eq!(ns.get(c).unwrap().link_target(), Some(d));
    }

    #[test]
    fn test_depth_and_preorder() {
        let mut ns = Namespace::new();
        let root = ns.new_file("root");
        let a = ns.new_file("a");
        let b = ns.new_file("b");
        let c = ns.new_file("c");
        ns.add_child(root, a);
        ns.add_child(root, b);
        ns.add_child(a, c);
        ns.set_root(root);

        assert_eq!(ns.depth(root), Some(0));
        assert_eq!(ns.depth(c), Some(2));

        let names: Vec<_> = ns.iter().map(|(_, n)| n.name().to_string()).collect();
        assert_eq!(names, vec!["root", "a", "c", "b"]);
    }
}
