//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// `node-types.json` of a grammar (positional).
pub fn node_types_arg() -> Arg {
    Arg::new("node_types")
        .value_name("NODE_TYPES")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Path to the grammar's node-types.json")
}

/// Root node type (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("TYPE")
        .help("Root node type, when node-types.json does not mark one")
}

/// Fallback alias for undeclared types (--alias FROM=TO, repeatable).
pub fn alias_arg() -> Arg {
    Arg::new("alias")
        .long("alias")
        .value_name("FROM=TO")
        .action(ArgAction::Append)
        .value_parser(parse_alias)
        .help("Resolve references to an undeclared type FROM as TO")
}

/// Placement of synthesized types (--hoist).
pub fn hoist_arg() -> Arg {
    Arg::new("hoist")
        .long("hoist")
        .value_name("WHEN")
        .default_value("as-needed")
        .value_parser(["never", "always", "as-needed"])
        .help("Declare synthesized types at top level")
}

/// Representation of single optional accessors (--optional).
pub fn optional_arg() -> Arg {
    Arg::new("optional")
        .long("optional")
        .value_name("STYLE")
        .default_value("wrapper")
        .value_parser(["wrapper", "annotation"])
        .help("How single optional accessors express absence")
}

/// Custom methods file (--custom-methods).
pub fn custom_methods_arg() -> Arg {
    Arg::new("custom_methods")
        .long("custom-methods")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON file with extra methods per node type")
}

/// Omit methods from the dump (--no-methods).
pub fn no_methods_arg() -> Arg {
    Arg::new("no_methods")
        .long("no-methods")
        .action(ArgAction::SetTrue)
        .help("Only show types, not their methods")
}

fn parse_alias(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{value}'")),
    }
}
