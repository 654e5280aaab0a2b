//! Custom methods file (`--custom-methods`).
//!
//! ```json
//! {
//!   "node-types": {
//!     "call": [
//!       {
//!         "name": "accept",
//!         "type-variables": ["R"],
//!         "parameters": ["Visitor<R>"],
//!         "return-type": "R"
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Types are written as the emitter spells them: `Name`, `Raw<Arg, ...>`,
//! optionally prefixed by `@Annotation`s. Anything else (`int[]`) is kept
//! verbatim and only matches identical text.

use std::collections::BTreeMap;
use std::path::Path;

use sapling_lib::promote::TypeRef;
use sapling_lib::{Config, CustomMethod};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CustomMethodsConfig {
    #[serde(default)]
    pub node_types: BTreeMap<String, Vec<MethodConfig>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MethodConfig {
    pub name: String,
    #[serde(default)]
    pub type_variables: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    pub return_type: Option<String>,
}

impl MethodConfig {
    fn to_custom_method(&self) -> Result<CustomMethod, String> {
        let mut method = CustomMethod::new(&self.name);
        for variable in &self.type_variables {
            method = method.type_param(variable);
        }
        for param in &self.parameters {
            method = method.param(parse_type(param)?);
        }
        if let Some(ret) = &self.return_type {
            method = method.returns(parse_type(ret)?);
        }
        Ok(method)
    }
}

impl CustomMethodsConfig {
    pub fn parse(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid custom methods: {}", e))
    }

    pub fn read(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
        Self::parse(&json)
    }

    /// Adds every method to `config`.
    pub fn apply(&self, mut config: Config) -> Result<Config, String> {
        for (node_type, methods) in &self.node_types {
            for method in methods {
                config = config.custom_method(node_type, method.to_custom_method()?);
            }
        }
        Ok(config)
    }
}

/// Parses a type as written in the custom methods file.
pub fn parse_type(text: &str) -> Result<TypeRef, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("empty type".to_string());
    }

    if let Some(rest) = text.strip_prefix('@') {
        let (annotation, inner) = rest
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("annotation without a type: '{text}'"))?;
        return Ok(parse_type(inner)?.annotated(annotation));
    }

    if let Some(open) = text.find('<') {
        let Some(inner) = text[open + 1..].strip_suffix('>') else {
            return Err(format!("unbalanced type arguments: '{text}'"));
        };
        let raw = text[..open].trim();
        if !is_type_name(raw) {
            return Err(format!("invalid type: '{text}'"));
        }
        let args = split_args(inner)
            .ok_or_else(|| format!("unbalanced type arguments: '{text}'"))?
            .into_iter()
            .map(parse_type)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(TypeRef::container(raw, args));
    }

    if is_type_name(text) {
        Ok(TypeRef::named(text))
    } else {
        Ok(TypeRef::opaque(text))
    }
}

fn is_type_name(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '$')
}

/// Splits top-level comma separated type arguments.
fn split_args(text: &str) -> Option<Vec<&str>> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                args.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    args.push(&text[start..]);
    Some(args)
}
