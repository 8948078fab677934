//! Name lookup, root-to-node paths and lowest common ancestors over a [`Namespace`].

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::arena::{Namespace, Node, NodeId};
use crate::domain::error::{Argument, DomainError, DomainResult};

/// Stateless query algorithms borrowing a namespace.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    namespace: &'a Namespace,
}

impl<'a> Resolver<'a> {
    pub fn new(namespace: &'a Namespace) -> Self {
        Self { namespace }
    }

    /// Finds the first node called `name`, searching depth-first from `start`.
    ///
    /// Soft links are transparent: a link is replaced by its target before it is
    /// examined, so the link's own name never matches. At each node the node's
    /// name is checked first, then its aliases (most recently registered first),
    /// then its children in order. A matching alias yields the alias target as is.
    ///
    /// An absent `start` yields `None`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_file_by_name(&self, start: Option<NodeId>, name: &str) -> Option<NodeId> {
        let start = start?;
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            let Some((id, node)) = self.follow_links(current, &mut visited) else {
                continue;
            };
            trace!("visiting '{}'", node.name());

            if node.name() == name {
                debug!("found '{}' as {:?}", name, id);
                return Some(id);
            }
            if let Some(alias) = node
                .aliases()
                .iter()
                .rev()
                .find(|a| self.namespace.name(a.alias) == Some(name))
            {
                debug!("found '{}' as alias on '{}'", name, node.name());
                return Some(alias.target);
            }
            for &child in node.children().iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// Resolves the link chain starting at `id` to a concrete node not seen before.
    ///
    /// Nodes already in `visited` were searched without success, so they are skipped.
    fn follow_links(
        &self,
        mut id: NodeId,
        visited: &mut HashSet<NodeId>,
    ) -> Option<(NodeId, &'a Node)> {
        loop {
            if !visited.insert(id) {
                return None;
            }
            let node = self.namespace.get(id)?;
            match node.link_target() {
                Some(target) => id = target,
                None => return Some((id, node)),
            }
        }
    }

    /// Ordered nodes from `root` to `target`, both inclusive, following parent links.
    ///
    /// Links and aliases are not chased: the path to a soft link is the path to the
    /// link's own position in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn find_path(
        &self,
        root: Option<NodeId>,
        target: Option<NodeId>,
    ) -> DomainResult<Vec<NodeId>> {
        let root = root.ok_or(DomainError::NilArgument {
            argument: Argument::Root,
        })?;
        let target = target.ok_or(DomainError::NilArgument {
            argument: Argument::Target,
        })?;

        let mut path: Vec<NodeId> = self.namespace.ancestors(target).collect();
        if path.last() != Some(&root) {
            return Err(DomainError::NotFound { target });
        }
        path.reverse();
        Ok(path)
    }

    /// Deepest node shared by the root paths of `file1` and `file2`.
    ///
    /// Returns `Ok(None)` only if the two paths share no prefix at all.
    #[instrument(level = "debug", skip(self))]
    pub fn find_parent(
        &self,
        root: Option<NodeId>,
        file1: Option<NodeId>,
        file2: Option<NodeId>,
    ) -> DomainResult<Option<NodeId>> {
        if root.is_none() {
            return Err(DomainError::NilArgument {
                argument: Argument::Root,
            });
        }
        let file1 = file1.ok_or(DomainError::NilArgument {
            argument: Argument::File1,
        })?;
        let file2 = file2.ok_or(DomainError::NilArgument {
            argument: Argument::File2,
        })?;

        let path1 = self.find_path(root, Some(file1))?;
        let path2 = self.find_path(root, Some(file2))?;

        let parent = path1
            .iter()
            .zip(path2.iter())
            .take_while(|(a, b)| a == b)
            .last()
            .map(|(a, _)| *a);
        debug!("common parent: {:?}", parent);
        Ok(parent)
    }

    /// Resolves two names from `root` and returns their closest common parent.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_lca(
        &self,
        root: Option<NodeId>,
        name1: &str,
        name2: &str,
    ) -> DomainResult<Option<NodeId>> {
        let file1 = self
            .find_file_by_name(root, name1)
            .ok_or_else(|| DomainError::NameNotFound(name1.to_string()))?;
        let file2 = self
            .find_file_by_name(root, name2)
            .ok_or_else(|| DomainError::NameNotFound(name2.to_string()))?;
        self.find_parent(root, Some(file1), Some(file2))
    }
}
