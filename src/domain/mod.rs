//! Domain layer: the namespace model and its query algorithms
//!
//! This layer is independent of external concerns (no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod resolver;

pub use arena::{Alias, Namespace, Node, NodeId, NodeKind};
pub use builder::{AliasPolicy, AliasSpec, NodeSpec, TreeBuilder};
pub use error::{Argument, DomainError, DomainResult};
pub use resolver::Resolver;
