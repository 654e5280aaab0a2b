//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use sapling_lib::{HoistPolicy, OptionalStyle};

use super::*;
use crate::cli::commands::{build_cli, check_command, dump_command};

#[test]
fn dump_defaults() {
    let m = dump_command()
        .try_get_matches_from(["dump", "node-types.json"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.model.node_types, PathBuf::from("node-types.json"));
    assert_eq!(params.model.root, None);
    assert!(params.model.aliases.is_empty());
    assert_eq!(params.model.hoist, HoistPolicy::AsNeeded);
    assert_eq!(params.model.optional, OptionalStyle::Wrapper);
    assert!(!params.no_methods);
    assert_eq!(params.model.custom_methods, None);
}

#[test]
fn dump_extracts_all_flags() {
    let m = dump_command()
        .try_get_matches_from([
            "dump",
            "node-types.json",
            "--root",
            "source_file",
            "--alias",
            "expr=_expression",
            "--alias",
            "stmt=_statement",
            "--hoist",
            "always",
            "--optional",
            "annotation",
            "--no-methods",
            "--custom-methods",
            "methods.json",
        ])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.model.root.as_deref(), Some("source_file"));
    assert_eq!(
        params.model.aliases,
        [
            ("expr".to_string(), "_expression".to_string()),
            ("stmt".to_string(), "_statement".to_string()),
        ]
    );
    assert_eq!(params.model.hoist, HoistPolicy::Always);
    assert_eq!(params.model.optional, OptionalStyle::Annotation);
    assert!(params.no_methods);
    assert_eq!(
        params.model.custom_methods,
        Some(PathBuf::from("methods.json"))
    );
}

#[test]
fn malformed_alias_is_rejected() {
    for alias in ["expr", "=x", "x="] {
        let result =
            check_command().try_get_matches_from(["check", "node-types.json", "--alias", alias]);
        assert!(result.is_err(), "alias '{alias}' should be rejected");
    }
}

#[test]
fn unknown_hoist_policy_is_rejected() {
    let result =
        check_command().try_get_matches_from(["check", "node-types.json", "--hoist", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn node_types_path_is_required() {
    assert!(check_command().try_get_matches_from(["check"]).is_err());
}

#[test]
fn check_does_not_accept_dump_only_flags() {
    let result =
        check_command().try_get_matches_from(["check", "node-types.json", "--no-methods"]);
    assert!(result.is_err());
}

#[test]
fn check_params_extraction() {
    let m = check_command()
        .try_get_matches_from(["check", "node-types.json", "--hoist", "never"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.model.hoist, HoistPolicy::Never);
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["sapling"]).is_err());
    assert!(
        build_cli()
            .try_get_matches_from(["sapling", "dump", "node-types.json"])
            .is_ok()
    );
}
