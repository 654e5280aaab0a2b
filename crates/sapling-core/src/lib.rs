#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Schema model for tree-sitter `node-types.json`.
//!
//! This is a 1:1 deserialization layer. Entry order and field order are kept
//! exactly as they appear in the file, since every derived declaration order
//! downstream follows schema order.

use indexmap::IndexMap;

pub mod utils;

#[cfg(test)]
mod utils_tests;

/// Raw node definition from `node-types.json`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub extra: bool,
    #[serde(default)]
    pub fields: IndexMap<String, RawCardinality>,
    pub children: Option<RawCardinality>,
    pub subtypes: Option<Vec<RawTypeRef>>,
}

impl RawNode {
    /// A bare node entry with no structure.
    pub fn new(type_name: impl Into<String>, named: bool) -> Self {
        Self {
            type_name: type_name.into(),
            named,
            root: false,
            extra: false,
            fields: IndexMap::new(),
            children: None,
            subtypes: None,
        }
    }

    pub fn with_children(mut self, children: RawCardinality) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, slot: RawCardinality) -> Self {
        self.fields.insert(name.into(), slot);
        self
    }

    pub fn with_subtypes(mut self, subtypes: Vec<RawTypeRef>) -> Self {
        self.subtypes = Some(subtypes);
        self
    }

    pub fn with_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn with_extra(mut self, extra: bool) -> Self {
        self.extra = extra;
        self
    }

    /// Whether this entry declares a supertype (a `subtypes` list).
    pub fn is_supertype(&self) -> bool {
        self.subtypes.is_some()
    }

    /// Whether this entry declares children or at least one field.
    pub fn has_structure(&self) -> bool {
        self.children.is_some() || !self.fields.is_empty()
    }
}

/// Cardinality constraints for a field or children slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RawCardinality {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<RawTypeRef>,
}

impl RawCardinality {
    pub fn new(multiple: bool, required: bool, types: Vec<RawTypeRef>) -> Self {
        Self {
            multiple,
            required,
            types,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        Cardinality {
            multiple: self.multiple,
            required: self.required,
        }
    }
}

/// Reference to a node type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RawTypeRef {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
}

impl RawTypeRef {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            named: true,
        }
    }

    pub fn token(text: impl Into<String>) -> Self {
        Self {
            type_name: text.into(),
            named: false,
        }
    }
}

/// Cardinality info for a field or children slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    pub multiple: bool,
    pub required: bool,
}

/// Parse `node-types.json` content into raw nodes.
pub fn parse_node_types(json: &str) -> Result<Vec<RawNode>, serde_json::Error> {
    serde_json::from_str(json)
}
