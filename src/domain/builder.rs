//! Tree builder for turning TOML layouts into namespaces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::{Namespace, NodeId};
use crate::domain::error::{DomainError, DomainResult};

/// How to treat two aliases with the same name on one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasPolicy {
    /// Both are kept; lookups prefer the one registered last.
    #[default]
    LastWins,
    /// The second definition is a layout error.
    Reject,
}

/// One node of a layout file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub name: String,
    /// Name of the node this one forwards to.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub aliases: Vec<AliasSpec>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AliasSpec {
    pub name: String,
    pub target: String,
}

/// References are resolved only after every node exists.
enum Pending<'s> {
    Link { node: NodeId, spec: &'s NodeSpec, target: &'s str },
    Alias { owner: NodeId, spec: &'s NodeSpec, alias: &'s AliasSpec },
}

/// Constructs namespaces from layout descriptions.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    alias_policy: AliasPolicy,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias_policy(mut self, policy: AliasPolicy) -> Self {
        self.alias_policy = policy;
        self
    }

    /// The demo tree: `root -> {a -> {c, d}, b}` with alias `var -> a` on root.
    pub fn sample() -> Namespace {
        let mut ns = Namespace::new();
        let root = ns.new_file("root");
        let a = ns.new_file("a");
        let b = ns.new_file("b");
        let c = ns.new_file("c");
        let d = ns.new_file("d");

        ns.add_child(root, a);
        ns.add_child(root, b);
        ns.add_child(a, c);
        ns.add_child(a, d);

        let var = ns.new_file("var");
        ns.add_alias(root, var, a);
        ns.set_root(root);
        ns
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&self, path: &Path) -> DomainResult<Namespace> {
        if !path.is_file() {
            return Err(DomainError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| DomainError::InvalidLayout {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        self.parse(&content, Some(path.to_path_buf()))
    }

    #[instrument(level = "debug", skip(self, content))]
    pub fn build_from_str(&self, content: &str) -> DomainResult<Namespace> {
        self.parse(content, None)
    }

    fn parse(&self, content: &str, path: Option<PathBuf>) -> DomainResult<Namespace> {
        let spec: NodeSpec = toml::from_str(content).map_err(|e| DomainError::InvalidLayout {
            path,
            message: e.message().to_string(),
        })?;
        self.build(&spec)
    }

    /// Builds the structure first, then wires links and aliases by name.
    #[instrument(level = "debug", skip_all, fields(root = %spec.name))]
    pub fn build(&self, spec: &NodeSpec) -> DomainResult<Namespace> {
        let mut ns = Namespace::new();
        let mut pending = Vec::new();

        let root = ns.new_file(&spec.name);
        ns.set_root(root);

        let mut stack = vec![(spec, root)];
        while let Some((current, id)) = stack.pop() {
            if let Some(target) = current.link.as_deref() {
                if !current.children.is_empty() || !current.aliases.is_empty() {
                    return Err(DomainError::LinkWithChildren(current.name.clone()));
                }
                pending.push(Pending::Link { node: id, spec: current, target });
            }
            for alias in &current.aliases {
                pending.push(Pending::Alias { owner: id, spec: current, alias });
            }
            for child in &current.children {
                let child_id = ns.new_file(&child.name);
                ns.add_child(id, child_id);
                stack.push((child, child_id));
            }
        }

        for item in pending {
            match item {
                Pending::Link { node, spec, target } => {
                    let target_id = lookup(&ns, root, target, &spec.name, Some(node))?;
                    ns.set_link(node, target_id);
                }
                Pending::Alias { owner, spec, alias } => {
                    if self.alias_policy == AliasPolicy::Reject
                        && ns.has_alias_named(owner, &alias.name)
                    {
                        return Err(DomainError::DuplicateAlias {
                            owner: spec.name.clone(),
                            alias: alias.name.clone(),
                        });
                    }
                    let target_id = lookup(&ns, root, &alias.target, &alias.name, None)?;
                    let alias_id = ns.new_file(&alias.name);
                    ns.add_alias(owner, alias_id, target_id);
                }
            }
        }

        debug!("built namespace with {} nodes", ns.len());
        Ok(ns)
    }
}

/// First node called `name` in structural pre-order, never `exclude` itself.
///
/// A link sharing its target's name must not resolve to itself.
fn lookup(
    ns: &Namespace,
    root: NodeId,
    name: &str,
    referenced_by: &str,
    exclude: Option<NodeId>,
) -> DomainResult<NodeId> {
    ns.iter_from(root)
        .find(|(id, node)| Some(*id) != exclude && node.name() == name)
        .map(|(id, _)| id)
        .ok_or_else(|| DomainError::UnresolvedReference {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
}
