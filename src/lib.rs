//! Hierarchical namespace with aliases and soft links.
//!
//! Build a [`domain::Namespace`] with `new_file`/`add_child`/`add_alias`, or load one
//! from a TOML layout via [`domain::TreeBuilder`], then query it with
//! [`domain::Resolver`]: name lookup, root paths and closest common parents.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
