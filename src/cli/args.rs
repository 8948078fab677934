//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Resolve names and closest common parents in a namespace tree with aliases and soft links
#[derive(Parser, Debug)]
#[command(name = "fslca")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Layout file describing the tree (default: configured tree_file, else the sample tree)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "FSLCA_TREE")]
    pub tree: Option<PathBuf>,

    /// Additional config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Closest common parent of two names
    Lca {
        /// First name (node or alias)
        name1: String,
        /// Second name (node or alias)
        name2: String,
    },

    /// Resolve a name and show where it lives
    Find {
        /// Node or alias name
        name: String,
    },

    /// Show the root-to-node path of a name
    Path {
        /// Node or alias name
        name: String,
    },

    /// Show the namespace as tree
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
