//! Loading `node-types.json` and deriving a model from it.

use std::path::PathBuf;

use sapling_lib::{Config, DefaultNaming, HoistPolicy, Model, OptionalStyle};

use super::custom_methods::CustomMethodsConfig;

pub struct ModelArgs {
    pub node_types: PathBuf,
    pub root: Option<String>,
    pub aliases: Vec<(String, String)>,
    pub hoist: HoistPolicy,
    pub optional: OptionalStyle,
    pub custom_methods: Option<PathBuf>,
}

impl ModelArgs {
    pub fn config(&self) -> Config {
        let mut config = Config::new()
            .hoist(self.hoist)
            .optional_style(self.optional);
        if let Some(root) = &self.root {
            config = config.root(root);
        }
        for (from, to) in &self.aliases {
            config = config.alias(from, to);
        }
        config
    }
}

/// Reads and parses the node types file, then derives the model.
pub fn load_model(args: &ModelArgs) -> Result<Model, String> {
    let path = &args.node_types;
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    let mut config = args.config();
    if let Some(path) = &args.custom_methods {
        config = CustomMethodsConfig::read(path)?.apply(config)?;
    }
    derive_model(&json, &config)
}

pub fn derive_model(json: &str, config: &Config) -> Result<Model, String> {
    let nodes = sapling_core::parse_node_types(json)
        .map_err(|e| format!("invalid node-types.json: {}", e))?;
    tracing::debug!(types = nodes.len(), "parsed node types");
    sapling_lib::generate(&nodes, config, &DefaultNaming::new()).map_err(|e| e.to_string())
}
