//! Configuration for model derivation.

use indexmap::IndexMap;

use crate::hoist::HoistPolicy;
use crate::promote::{Signature, TypeRef};

/// How a single, optional accessor exposes absence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OptionalStyle {
    /// `Optional<T>`
    #[default]
    Wrapper,
    /// `T` annotated with `Nullable`
    Annotation,
}

/// A user-declared method added to a node type's wrapper.
///
/// Custom methods take part in common-method promotion like accessors do,
/// but never match an accessor of the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomMethod {
    pub signature: Signature,
    /// `None` for methods without a return value.
    pub return_type: Option<TypeRef>,
}

impl CustomMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            signature: Signature::new(name),
            return_type: None,
        }
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.signature.type_params.push(name.into());
        self
    }

    pub fn param(mut self, ty: TypeRef) -> Self {
        self.signature.params.push(ty);
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }
}

/// Configuration for a derivation run.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Root type when the schema does not declare one.
    pub(crate) root: Option<String>,
    /// Fallback names for references to undeclared types.
    pub(crate) aliases: IndexMap<String, String>,
    pub(crate) hoist: HoistPolicy,
    pub(crate) optional_style: OptionalStyle,
    /// Extra methods per schema type name.
    pub(crate) custom_methods: IndexMap<String, Vec<CustomMethod>>,
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root node type. Conflicts with a root declared by the schema.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }

    /// Resolve references to `from` as `to`. Aliases are single-hop.
    pub fn alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Set when synthesized types are declared at top level.
    pub fn hoist(mut self, policy: HoistPolicy) -> Self {
        self.hoist = policy;
        self
    }

    /// Set how single optional accessors express absence.
    pub fn optional_style(mut self, style: OptionalStyle) -> Self {
        self.optional_style = style;
        self
    }

    /// Add a custom method to the wrapper of `node_type`.
    pub fn custom_method(mut self, node_type: impl Into<String>, method: CustomMethod) -> Self {
        self.custom_methods
            .entry(node_type.into())
            .or_default()
            .push(method);
        self
    }
}
