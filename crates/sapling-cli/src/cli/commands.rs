//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Args every command deriving a model accepts.
fn with_model_args(cmd: Command) -> Command {
    cmd.arg(node_types_arg())
        .arg(root_arg())
        .arg(alias_arg())
        .arg(hoist_arg())
        .arg(optional_arg())
        .arg(custom_methods_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("sapling")
        .about("Typed wrapper model derivation for tree-sitter node types")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(dump_command())
        .subcommand(check_command())
}

/// Show the derived model.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the derived wrapper model")
        .after_help(
            r#"EXAMPLES:
  sapling dump node-types.json                     # types, slots and methods
  sapling dump node-types.json --no-methods        # types only
  sapling dump node-types.json --hoist always      # no nested types
  sapling dump node-types.json --alias expr=_expression
  sapling dump node-types.json --custom-methods methods.json"#,
        )
        .arg(no_methods_arg());

    with_model_args(cmd)
}

/// Validate that a model can be derived.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check that node-types.json yields a valid model")
        .after_help(
            r#"EXAMPLES:
  sapling check node-types.json
  sapling check node-types.json --root source_file"#,
        );

    with_model_args(cmd)
}
