//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use sapling_lib::{HoistPolicy, OptionalStyle};

use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::model::ModelArgs;

/// Params shared by every command that derives a model.
pub struct ModelParams {
    pub node_types: PathBuf,
    pub root: Option<String>,
    pub aliases: Vec<(String, String)>,
    pub hoist: HoistPolicy,
    pub optional: OptionalStyle,
    pub custom_methods: Option<PathBuf>,
}

impl ModelParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            node_types: m
                .get_one::<PathBuf>("node_types")
                .cloned()
                .unwrap_or_default(),
            root: m.get_one::<String>("root").cloned(),
            aliases: m
                .get_many::<(String, String)>("alias")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            hoist: parse_hoist(m),
            optional: parse_optional(m),
            custom_methods: m.get_one::<PathBuf>("custom_methods").cloned(),
        }
    }
}

impl From<ModelParams> for ModelArgs {
    fn from(p: ModelParams) -> Self {
        Self {
            node_types: p.node_types,
            root: p.root,
            aliases: p.aliases,
            hoist: p.hoist,
            optional: p.optional,
            custom_methods: p.custom_methods,
        }
    }
}

pub struct DumpParams {
    pub model: ModelParams,
    pub no_methods: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            model: ModelParams::from_matches(m),
            no_methods: m.get_flag("no_methods"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            model: p.model.into(),
            methods: !p.no_methods,
        }
    }
}

pub struct CheckParams {
    pub model: ModelParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            model: ModelParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            model: p.model.into(),
        }
    }
}

fn parse_hoist(m: &ArgMatches) -> HoistPolicy {
    match m.get_one::<String>("hoist").map(|s| s.as_str()) {
        Some("never") => HoistPolicy::Never,
        Some("always") => HoistPolicy::Always,
        _ => HoistPolicy::AsNeeded,
    }
}

fn parse_optional(m: &ArgMatches) -> OptionalStyle {
    match m.get_one::<String>("optional").map(|s| s.as_str()) {
        Some("annotation") => OptionalStyle::Annotation,
        _ => OptionalStyle::Wrapper,
    }
}
