//! Identifier policy.
//!
//! The derivation never builds identifiers itself; every name that ends up
//! in the model comes from a [`NamingPolicy`]. [`DefaultNaming`] is a
//! reasonable policy for most grammars, with an optional token name table
//! because automatically chosen token names are rarely meaningful.

use std::collections::HashMap;

use sapling_core::Cardinality;
use sapling_core::utils::{
    is_alphabetic_words, punctuation_name, to_pascal_case, to_snake_case, to_upper_snake_case,
};

use crate::{Error, Result};

/// Maps schema names plus structural context to identifiers.
///
/// `parent` is always the schema name of the enclosing node type, `members`
/// the schema names of the named types a slot permits.
pub trait NamingPolicy {
    fn type_name(&self, node: &str) -> String;

    fn type_name_constant(&self, node: &str) -> String;

    fn children_type_name(&self, parent: &str, members: &[&str]) -> String;

    fn children_token_type_name(&self, parent: &str, tokens: &[&str]) -> String;

    fn children_token_name(&self, parent: &str, token: &str, index: usize) -> Result<String>;

    fn children_getter_name(
        &self,
        parent: &str,
        members: &[&str],
        cardinality: Cardinality,
    ) -> String;

    fn field_name_constant(&self, parent: &str, field: &str) -> String;

    fn field_type_name(&self, parent: &str, field: &str, members: &[&str]) -> String;

    fn field_token_type_name(&self, parent: &str, field: &str, tokens: &[&str]) -> String;

    fn field_token_name(
        &self,
        parent: &str,
        field: &str,
        token: &str,
        index: usize,
    ) -> Result<String>;

    fn field_getter_name(
        &self,
        parent: &str,
        field: &str,
        members: &[&str],
        cardinality: Cardinality,
    ) -> String;

    /// Identifier of a synthesized type declared next to, instead of inside,
    /// its enclosing type.
    fn hoisted_type_name(&self, enclosing: &str, nested: &str) -> String {
        format!("{enclosing}{nested}")
    }
}

/// Wildcard key of a [`TokenNames`] table, matching any type or field.
pub const ANY: &str = "";

/// User-provided token variant names: parent type → field → token → name.
///
/// Children tokens are looked up with field [`ANY`]. Lookup order is
/// (type, field), (type, any), (any, field), (any, any).
#[derive(Clone, Debug, Default)]
pub struct TokenNames {
    mapping: HashMap<String, HashMap<String, HashMap<String, String>>>,
    exhaustive: bool,
}

impl TokenNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name `token` when it appears in `field` of `parent`; use [`ANY`] as
    /// a wildcard for either.
    pub fn insert(
        mut self,
        parent: impl Into<String>,
        field: impl Into<String>,
        token: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.mapping
            .entry(parent.into())
            .or_default()
            .entry(field.into())
            .or_default()
            .insert(token.into(), name.into());
        self
    }

    /// Fail with [`Error::UnmappedToken`] instead of falling back to
    /// generated names.
    pub fn exhaustive(mut self, value: bool) -> Self {
        self.exhaustive = value;
        self
    }

    fn lookup(&self, parent: &str, field: &str, token: &str) -> Option<&str> {
        [parent, ANY]
            .into_iter()
            .flat_map(|p| [field, ANY].into_iter().map(move |f| (p, f)))
            .find_map(|(p, f)| {
                self.mapping
                    .get(p)
                    .and_then(|fields| fields.get(f))
                    .and_then(|tokens| tokens.get(token))
                    .map(String::as_str)
            })
    }

    fn resolve(&self, parent: &str, field: &str, token: &str, index: usize) -> Result<String> {
        if let Some(name) = self.lookup(parent, field, token) {
            return Ok(name.to_string());
        }
        if self.exhaustive {
            return Err(Error::UnmappedToken {
                parent: parent.to_string(),
                field: field.to_string(),
                token: token.to_string(),
            });
        }
        Ok(generated_token_name(token, index))
    }
}

/// Fallback token variant name. Deliberately descriptive of the literal, not
/// of its meaning: `*` is `ASTERISK`, never `MULTIPLY`.
pub fn generated_token_name(token: &str, index: usize) -> String {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && let Some(name) = punctuation_name(c)
    {
        return name.to_string();
    }
    if is_alphabetic_words(token) {
        return token
            .split_whitespace()
            .map(|word| word.replace('-', "_").to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_");
    }
    format!("TOKEN_{index}")
}

/// Default identifiers: `NodeBinaryExpression`, nested `Child` and
/// `FieldLeft` types, getters `children`/`child`/`get_left`.
#[derive(Clone, Debug, Default)]
pub struct DefaultNaming {
    tokens: TokenNames,
}

impl DefaultNaming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_names(mut self, tokens: TokenNames) -> Self {
        self.tokens = tokens;
        self
    }
}

impl NamingPolicy for DefaultNaming {
    fn type_name(&self, node: &str) -> String {
        format!("Node{}", to_pascal_case(node.trim_start_matches('_')))
    }

    fn type_name_constant(&self, _node: &str) -> String {
        "TYPE_NAME".to_string()
    }

    fn children_type_name(&self, _parent: &str, _members: &[&str]) -> String {
        "Child".to_string()
    }

    fn children_token_type_name(&self, parent: &str, tokens: &[&str]) -> String {
        format!("{}Token", self.children_type_name(parent, tokens))
    }

    fn children_token_name(&self, parent: &str, token: &str, index: usize) -> Result<String> {
        self.tokens.resolve(parent, ANY, token, index)
    }

    fn children_getter_name(
        &self,
        _parent: &str,
        _members: &[&str],
        cardinality: Cardinality,
    ) -> String {
        if cardinality.multiple {
            "children".to_string()
        } else {
            "child".to_string()
        }
    }

    fn field_name_constant(&self, _parent: &str, field: &str) -> String {
        format!("FIELD_{}", to_upper_snake_case(field))
    }

    fn field_type_name(&self, _parent: &str, field: &str, _members: &[&str]) -> String {
        format!("Field{}", to_pascal_case(field))
    }

    fn field_token_type_name(&self, _parent: &str, field: &str, _tokens: &[&str]) -> String {
        format!("FieldToken{}", to_pascal_case(field))
    }

    fn field_token_name(
        &self,
        parent: &str,
        field: &str,
        token: &str,
        index: usize,
    ) -> Result<String> {
        self.tokens.resolve(parent, field, token, index)
    }

    fn field_getter_name(
        &self,
        _parent: &str,
        field: &str,
        _members: &[&str],
        _cardinality: Cardinality,
    ) -> String {
        format!("get_{}", to_snake_case(field))
    }
}
