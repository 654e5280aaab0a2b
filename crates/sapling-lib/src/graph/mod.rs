//! The type graph: node type descriptors plus the union and token types
//! synthesized for their slots.
//!
//! Descriptors are declared first and populated later, so references can
//! point at types whose own slots are not resolved yet. Every query on an
//! unpopulated descriptor is an error instead of an empty answer.

mod ids;
mod invariants;
mod lookup;


use indexmap::IndexMap;
use sapling_core::Cardinality;

pub use ids::{InterfaceId, NodeId, SlotType, TokenEnumId, TypeKey, UnionId};
pub use lookup::TypeIndex;

use crate::{Error, Result};

/// A node type of the schema.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    /// Name in the schema.
    pub name: String,
    /// Identifier of the wrapper type.
    pub ident: String,
    /// Name of the constant holding `name` in the wrapper, if any.
    pub constant: Option<String>,
    pub extra: bool,
    pub root: bool,
    body: Body,
    interfaces: Vec<InterfaceId>,
}

#[derive(Clone, Debug)]
enum Body {
    Regular(Option<Structure>),
    Supertype(Option<Vec<NodeId>>),
}

impl TypeDescriptor {
    pub fn regular(name: impl Into<String>, ident: impl Into<String>) -> Self {
        Self::with_body(name.into(), ident.into(), Body::Regular(None))
    }

    pub fn supertype(name: impl Into<String>, ident: impl Into<String>) -> Self {
        Self::with_body(name.into(), ident.into(), Body::Supertype(None))
    }

    fn with_body(name: String, ident: String, body: Body) -> Self {
        Self {
            name,
            ident,
            constant: None,
            extra: false,
            root: false,
            body,
            interfaces: Vec::new(),
        }
    }

    pub fn with_constant(mut self, constant: impl Into<String>) -> Self {
        self.constant = Some(constant.into());
        self
    }

    pub fn with_extra(mut self, extra: bool) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn is_supertype(&self) -> bool {
        matches!(self.body, Body::Supertype(_))
    }

    pub fn is_populated(&self) -> bool {
        match &self.body {
            Body::Regular(structure) => structure.is_some(),
            Body::Supertype(subtypes) => subtypes.is_some(),
        }
    }

    /// Interfaces this type implements: enclosing supertypes and the unions
    /// synthesized for slots that permit it, in the order they were added.
    pub fn interfaces(&self) -> &[InterfaceId] {
        &self.interfaces
    }
}

/// Children slot and fields of a regular node type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Structure {
    pub children: Option<ResolvedSlot>,
    pub fields: IndexMap<String, ResolvedSlot>,
}

impl Structure {
    /// Children slot first, then fields in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = &ResolvedSlot> {
        self.children.iter().chain(self.fields.values())
    }
}

/// A classified slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSlot {
    /// `None` for the children slot.
    pub field: Option<String>,
    /// Constant holding the field name; `None` for the children slot.
    pub constant: Option<String>,
    pub cardinality: Cardinality,
    pub slot_type: SlotType,
}

/// A union synthesized for a slot permitting more than one type.
#[derive(Clone, Debug)]
pub struct UnionType {
    /// Identifier relative to the enclosing type.
    pub ident: String,
    /// Identifier as referenced from anywhere: nested under the enclosing
    /// type's identifier, or the hoisted name.
    pub qualified: String,
    pub enclosing: NodeId,
    pub field: Option<String>,
    pub members: Vec<NodeId>,
    pub tokens: Option<TokenEnumId>,
    pub hoisted: bool,
}

/// A closed set of anonymous token texts permitted by a slot.
#[derive(Clone, Debug)]
pub struct TokenEnumType {
    pub ident: String,
    pub qualified: String,
    pub enclosing: NodeId,
    pub field: Option<String>,
    pub variants: Vec<TokenVariant>,
    /// The union this enum is a member of, for slots mixing tokens and
    /// named types.
    pub union: Option<UnionId>,
    pub hoisted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenVariant {
    pub ident: String,
    /// Token text as it appears in the source.
    pub text: String,
}

/// Arena of all types, addressed by id.
#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeDescriptor>,
    unions: Vec<UnionType>,
    token_enums: Vec<TokenEnumType>,
    index: TypeIndex,
}

impl TypeGraph {
    pub fn new(aliases: IndexMap<String, String>) -> Self {
        Self {
            index: TypeIndex::new(aliases),
            ..Self::default()
        }
    }

    /// Declares an unpopulated node type.
    pub fn declare(&mut self, descriptor: TypeDescriptor) -> Result<NodeId> {
        let id = NodeId::from_index(self.nodes.len());
        self.index.insert(&descriptor.name, id)?;
        self.nodes.push(descriptor);
        Ok(id)
    }

    pub fn index(&self) -> &TypeIndex {
        &self.index
    }

    /// Resolves a reference, see [`TypeIndex::resolve`].
    pub fn lookup(&self, name: &str, referrer: &str) -> Result<NodeId> {
        self.index.resolve(name, referrer)
    }

    pub fn node(&self, id: NodeId) -> &TypeDescriptor {
        self.ensure_node(id)
    }

    pub fn union(&self, id: UnionId) -> &UnionType {
        self.ensure_union(id)
    }

    pub fn token_enum(&self, id: TokenEnumId) -> &TokenEnumType {
        self.ensure_token_enum(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TypeDescriptor)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }

    pub fn unions(&self) -> impl Iterator<Item = (UnionId, &UnionType)> {
        self.unions
            .iter()
            .enumerate()
            .map(|(i, union)| (UnionId::from_index(i), union))
    }

    pub fn token_enums(&self) -> impl Iterator<Item = (TokenEnumId, &TokenEnumType)> {
        self.token_enums
            .iter()
            .enumerate()
            .map(|(i, tokens)| (TokenEnumId::from_index(i), tokens))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children and fields of a regular type. Supertypes have none.
    pub fn structure(&self, id: NodeId) -> Result<Option<&Structure>> {
        let node = self.node(id);
        match &node.body {
            Body::Regular(Some(structure)) => Ok(Some(structure)),
            Body::Regular(None) => Err(Error::NotYetPopulated(node.name.clone())),
            Body::Supertype(_) => Ok(None),
        }
    }

    /// Direct subtypes of a supertype. Regular types have none.
    pub fn subtypes(&self, id: NodeId) -> Result<&[NodeId]> {
        let node = self.node(id);
        match &node.body {
            Body::Supertype(Some(subtypes)) => Ok(subtypes),
            Body::Supertype(None) => Err(Error::NotYetPopulated(node.name.clone())),
            Body::Regular(_) => Ok(&[]),
        }
    }

    pub fn populate_structure(&mut self, id: NodeId, structure: Structure) -> Result<()> {
        let node = self.ensure_node_mut(id);
        match &mut node.body {
            Body::Regular(slot @ None) => {
                *slot = Some(structure);
                Ok(())
            }
            Body::Regular(Some(_)) => Err(Error::AlreadyPopulated(node.name.clone())),
            Body::Supertype(_) => Err(Error::SupertypeHasStructure(node.name.clone())),
        }
    }

    /// Records the subtypes of a supertype, making each of them implement it.
    pub fn populate_subtypes(&mut self, id: NodeId, subtypes: Vec<NodeId>) -> Result<()> {
        let node = self.ensure_node_mut(id);
        match &mut node.body {
            Body::Supertype(slot @ None) => {
                *slot = Some(subtypes.clone());
            }
            Body::Supertype(Some(_)) => return Err(Error::AlreadyPopulated(node.name.clone())),
            Body::Regular(_) => {
                return Err(Error::Schema(format!("'{}' is not a supertype", node.name)));
            }
        }
        for subtype in subtypes {
            self.add_interface(subtype, InterfaceId::Supertype(id));
        }
        Ok(())
    }

    pub(crate) fn mark_root(&mut self, id: NodeId) {
        self.ensure_node_mut(id).root = true;
    }

    pub(crate) fn add_interface(&mut self, id: NodeId, interface: InterfaceId) {
        let node = self.ensure_node_mut(id);
        if !node.interfaces.contains(&interface) {
            node.interfaces.push(interface);
        }
    }

    /// Adds a union and makes its members implement it.
    pub(crate) fn add_union(&mut self, union: UnionType) -> UnionId {
        let id = UnionId::from_index(self.unions.len());
        for &member in &union.members {
            self.add_interface(member, InterfaceId::Union(id));
        }
        if let Some(tokens) = union.tokens {
            self.ensure_token_enum_mut(tokens).union = Some(id);
        }
        self.unions.push(union);
        id
    }

    pub(crate) fn add_token_enum(&mut self, tokens: TokenEnumType) -> TokenEnumId {
        let id = TokenEnumId::from_index(self.token_enums.len());
        self.token_enums.push(tokens);
        id
    }

    pub(crate) fn union_mut(&mut self, id: UnionId) -> &mut UnionType {
        self.ensure_union_mut(id)
    }

    pub(crate) fn token_enum_mut(&mut self, id: TokenEnumId) -> &mut TokenEnumType {
        self.ensure_token_enum_mut(id)
    }

    /// Identifier of any type, qualified for synthesized ones.
    pub fn qualified_ident(&self, key: TypeKey) -> &str {
        match key {
            TypeKey::Node(id) => &self.node(id).ident,
            TypeKey::Union(id) => &self.union(id).qualified,
            TypeKey::Tokens(id) => &self.token_enum(id).qualified,
        }
    }
}
