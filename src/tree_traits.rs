/*
Rendering of a namespace as a termtree for terminal display.

Soft links render as `name -> target`, alias tables as `[alias => target]`
annotations after the owning node's name.
 */
use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Namespace, NodeId};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Namespace {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let mut tree = Tree::new(label(self, root_idx));

            fn build_tree(ns: &Namespace, node_idx: NodeId, parent_tree: &mut Tree<String>) {
                if let Some(node) = ns.get(node_idx) {
                    for &child_idx in node.children() {
                        let mut child_tree = Tree::new(label(ns, child_idx));
                        build_tree(ns, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}

fn label(ns: &Namespace, id: NodeId) -> String {
    let Some(node) = ns.get(id) else {
        return "?".to_string();
    };
    let name_of = |id: NodeId| ns.name(id).unwrap_or("?").to_string();

    let mut label = node.to_string();
    if let Some(target) = node.link_target() {
        label.push_str(&format!(" -> {}", name_of(target)));
    }
    if !node.aliases().is_empty() {
        let aliases = node
            .aliases()
            .iter()
            .map(|a| format!("{} => {}", name_of(a.alias), name_of(a.target)))
            .join(", ");
        label.push_str(&format!(" [{}]", aliases));
    }
    label
}
