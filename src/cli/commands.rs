use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Namespace, NodeId, Resolver, TreeBuilder};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Lca { name1, name2 }) => {
            _lca(&load_namespace(cli.tree.as_deref(), &settings)?, name1, name2)
        }
        Some(Commands::Find { name }) => _find(&load_namespace(cli.tree.as_deref(), &settings)?, name),
        Some(Commands::Path { name }) => _path(&load_namespace(cli.tree.as_deref(), &settings)?, name),
        Some(Commands::Tree) => _tree(&load_namespace(cli.tree.as_deref(), &settings)?),
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e)),
    }
}

/// Namespace from `--tree`, else the configured `tree_file`, else the sample tree.
#[instrument(level = "debug", skip(settings))]
pub fn load_namespace(tree: Option<&Path>, settings: &Settings) -> CliResult<Namespace> {
    let builder = TreeBuilder::new().with_alias_policy(settings.alias_policy);
    match tree.or(settings.tree_file.as_deref()) {
        Some(path) => Ok(builder.build_from_file(path)?),
        None => Ok(TreeBuilder::sample()),
    }
}

/// Resolves `name` from the namespace root, failing when nothing matches.
pub fn resolve(ns: &Namespace, name: &str) -> CliResult<NodeId> {
    Resolver::new(ns)
        .find_file_by_name(ns.root(), name)
        .ok_or_else(|| crate::domain::DomainError::NameNotFound(name.to_string()).into())
}

/// Node names along the root path of `node`, joined for display.
pub fn format_path(ns: &Namespace, node: NodeId) -> CliResult<String> {
    let path = Resolver::new(ns).find_path(ns.root(), Some(node))?;
    Ok(path
        .into_iter()
        .filter_map(|id| ns.name(id))
        .join(" / "))
}

/// Name of the closest common parent of two names, None if they share none.
pub fn describe_lca(ns: &Namespace, name1: &str, name2: &str) -> CliResult<Option<String>> {
    let parent = Resolver::new(ns).resolve_lca(ns.root(), name1, name2)?;
    Ok(parent.and_then(|id| ns.get(id)).map(|n| n.to_string()))
}

/// What `find` reports about a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindReport {
    /// Name of the node the lookup landed on (differs from the query for aliases)
    pub resolved: String,
    /// Target name when the node is a soft link
    pub link_target: Option<String>,
    /// Root path of the node
    pub path: String,
}

pub fn describe_find(ns: &Namespace, name: &str) -> CliResult<FindReport> {
    let node = resolve(ns, name)?;
    let link_target = ns
        .get(node)
        .and_then(|n| n.link_target())
        .and_then(|target| ns.get(target))
        .map(|n| n.to_string());
    Ok(FindReport {
        resolved: ns.name(node).unwrap_or_default().to_string(),
        link_target,
        path: format_path(ns, node)?,
    })
}

#[instrument(skip(ns))]
fn _lca(ns: &Namespace, name1: &str, name2: &str) -> CliResult<()> {
    match describe_lca(ns, name1, name2)? {
        Some(parent) => output::action("The closest common parent directory is", &parent),
        None => output::warning(&format!("'{}' and '{}' share no common parent", name1, name2)),
    }
    Ok(())
}

#[instrument(skip(ns))]
fn _find(ns: &Namespace, name: &str) -> CliResult<()> {
    let report = describe_find(ns, name)?;
    if report.resolved != name {
        output::action("Resolved", &format!("{} => {}", name, report.resolved));
    } else {
        output::action("Found", &report.resolved);
    }
    if let Some(target) = &report.link_target {
        output::detail(&format!("soft link to {}", target));
    }
    output::detail(&report.path);
    Ok(())
}

#[instrument(skip(ns))]
fn _path(ns: &Namespace, name: &str) -> CliResult<()> {
    let node = resolve(ns, name)?;
    output::info(&format_path(ns, node)?);
    Ok(())
}

#[instrument(skip(ns))]
fn _tree(ns: &Namespace) -> CliResult<()> {
    output::info(&ns.to_tree_string());
    Ok(())
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Merged configuration");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::action(
                "global",
                &format!(
                    "{}{}",
                    path.display(),
                    if path.exists() { "" } else { " (not found)" }
                ),
            ),
            None => output::warning("no home directory, global config unavailable"),
        },
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("no home directory, global config unavailable".into())
            })?;
            if path.exists() && !force {
                return Err(CliError::InvalidArgs(format!(
                    "{} exists, use --force to overwrite",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}
