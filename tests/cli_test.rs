//! Tests for the command helpers behind the CLI

use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::rstest;

use fslca::cli::commands::{
    describe_find, describe_lca, format_path, load_namespace, resolve, FindReport,
};
use fslca::cli::{Cli, CliError, Commands};
use fslca::config::Settings;
use fslca::domain::{AliasPolicy, Argument, DomainError, NodeId, TreeBuilder};
use fslca::exitcode;

#[test]
fn given_no_tree_option_when_loading_then_uses_sample_tree() {
    let ns = load_namespace(None, &Settings::default()).unwrap();

    let var = resolve(&ns, "var").unwrap();
    assert_eq!(ns.name(var), Some("a"));
    assert_eq!(format_path(&ns, var).unwrap(), "root / a");
}

#[test]
fn given_tree_option_when_loading_then_overrides_configured_file() {
    let settings = Settings {
        tree_file: Some(PathBuf::from("/nonexistent/configured.toml")),
        alias_policy: AliasPolicy::LastWins,
    };

    let ns = load_namespace(Some(Path::new("tests/resources/layouts/complex.toml")), &settings)
        .unwrap();

    let f = resolve(&ns, "f").unwrap();
    assert_eq!(format_path(&ns, f).unwrap(), "root / a / d / f");
}

#[test]
fn given_configured_tree_file_when_loading_then_uses_it_with_policy() {
    let settings = Settings {
        tree_file: Some(PathBuf::from("tests/resources/layouts/duplicate_alias.toml")),
        alias_policy: AliasPolicy::Reject,
    };

    let err = load_namespace(None, &settings).unwrap_err();

    assert!(matches!(
        err,
        CliError::Domain(DomainError::DuplicateAlias { .. })
    ));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_unknown_name_when_resolving_then_not_found_exit_code() {
    let ns = load_namespace(None, &Settings::default()).unwrap();

    let err = resolve(&ns, "nope").unwrap_err();

    assert_eq!(err.to_string(), "no node named 'nope' is reachable from the root");
    assert_eq!(err.exit_code(), exitcode::NOTFOUND);
}

#[rstest]
#[case(DomainError::FileNotFound(PathBuf::from("x.toml")), exitcode::NOINPUT)]
#[case(DomainError::NilArgument { argument: Argument::File1 }, exitcode::SOFTWARE)]
#[case(DomainError::LinkWithChildren("h".into()), exitcode::DATAERR)]
fn given_domain_error_when_mapping_then_returns_sysexits_code(
    #[case] error: DomainError,
    #[case] code: i32,
) {
    assert_eq!(CliError::from(error).exit_code(), code);
}

#[test]
fn given_lca_arguments_when_parsing_then_builds_command() {
    let cli = Cli::parse_from(["fslca", "-dd", "--tree", "layout.toml", "lca", "b", "d"]);

    assert_eq!(cli.debug, 2);
    assert_eq!(cli.tree, Some(PathBuf::from("layout.toml")));
    match cli.command {
        Some(Commands::Lca { name1, name2 }) => {
            assert_eq!(name1, "b");
            assert_eq!(name2, "d");
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_sample_tree_when_resolving_demo_names_then_root_is_common_parent() {
    let ns = load_namespace(None, &Settings::default()).unwrap();
    let resolver = fslca::domain::Resolver::new(&ns);

    let parent: Option<NodeId> = resolver.resolve_lca(ns.root(), "b", "d").unwrap();

    assert_eq!(parent, ns.root());
}

#[rstest]
#[case("b", "d", "root")]
#[case("c", "d", "a")]
#[case("var", "d", "a")]
fn given_sample_tree_when_describing_lca_then_names_common_parent(
    #[case] name1: &str,
    #[case] name2: &str,
    #[case] expected: &str,
) {
    let ns = load_namespace(None, &Settings::default()).unwrap();

    assert_eq!(
        describe_lca(&ns, name1, name2).unwrap(),
        Some(expected.to_string())
    );
}

#[test]
fn given_unknown_name_when_describing_lca_then_errors_with_not_found() {
    let ns = load_namespace(None, &Settings::default()).unwrap();

    let err = describe_lca(&ns, "b", "ghost").unwrap_err();

    assert!(matches!(err, CliError::Domain(DomainError::NameNotFound(ref n)) if n == "ghost"));
    assert_eq!(err.exit_code(), exitcode::NOTFOUND);
}

#[test]
fn given_alias_when_describing_find_then_reports_resolved_node_and_path() {
    let ns = load_namespace(None, &Settings::default()).unwrap();

    let report = describe_find(&ns, "var").unwrap();

    assert_eq!(
        report,
        FindReport {
            resolved: "a".into(),
            link_target: None,
            path: "root / a".into(),
        }
    );
}

#[test]
fn given_alias_to_soft_link_when_describing_find_then_reports_link_target() {
    let layout = r#"
name = "root"

[[aliases]]
name = "shortcut"
target = "h"

[[children]]
name = "a"

  [[children.children]]
  name = "d"

[[children]]
name = "h"
link = "d"
"#;
    let ns = TreeBuilder::new().build_from_str(layout).unwrap();

    let report = describe_find(&ns, "shortcut").unwrap();

    assert_eq!(report.resolved, "h");
    assert_eq!(report.link_target.as_deref(), Some("d"));
    assert_eq!(report.path, "root / h");
}
