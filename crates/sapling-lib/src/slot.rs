//! Slot classification.
//!
//! A slot (the children of a node type, or one of its fields) permits a
//! set of types. Depending on what that set contains, its accessor returns
//! an existing node type directly, a synthesized token enum, or a
//! synthesized union.

use indexmap::IndexSet;
use sapling_core::RawCardinality;

use crate::graph::{
    NodeId, ResolvedSlot, SlotType, TokenEnumId, TokenEnumType, TokenVariant, TypeGraph, UnionId,
    UnionType,
};
use crate::naming::NamingPolicy;
use crate::{Error, Result};

/// Classifies one slot of `enclosing`, synthesizing types as needed.
///
/// `field` is `None` for the children slot. Every referenced node type
/// must already be declared; a synthesized union makes its members
/// implement it.
pub fn classify_slot(
    graph: &mut TypeGraph,
    naming: &dyn NamingPolicy,
    enclosing: NodeId,
    field: Option<&str>,
    raw: &RawCardinality,
) -> Result<ResolvedSlot> {
    let parent = graph.node(enclosing).name.clone();

    let mut named: IndexSet<NodeId> = IndexSet::new();
    let mut tokens: IndexSet<&str> = IndexSet::new();
    for ty in &raw.types {
        if ty.named {
            named.insert(graph.lookup(&ty.type_name, &parent)?);
        } else if !tokens.insert(ty.type_name.as_str()) {
            return Err(Error::DuplicateToken {
                token: ty.type_name.clone(),
                enclosing: parent,
            });
        }
    }

    let slot_type = match (named.len(), tokens.is_empty()) {
        (0, true) => {
            return Err(Error::Schema(format!(
                "slot '{}' of '{parent}' permits no types",
                field.unwrap_or("children"),
            )));
        }
        (1, true) => SlotType::Node(named[0]),
        (0, false) => SlotType::Tokens(add_token_enum(
            graph, naming, enclosing, &parent, field, &tokens,
        )?),
        _ => {
            let tokens = if tokens.is_empty() {
                None
            } else {
                Some(add_token_enum(
                    graph, naming, enclosing, &parent, field, &tokens,
                )?)
            };
            SlotType::Union(add_union(
                graph,
                naming,
                enclosing,
                &parent,
                field,
                named.into_iter().collect(),
                tokens,
            ))
        }
    };

    tracing::trace!(%parent, field = field.unwrap_or("<children>"), ?slot_type, "classified slot");
    Ok(ResolvedSlot {
        field: field.map(str::to_string),
        constant: field.map(|field| naming.field_name_constant(&parent, field)),
        cardinality: raw.cardinality(),
        slot_type,
    })
}

fn add_token_enum(
    graph: &mut TypeGraph,
    naming: &dyn NamingPolicy,
    enclosing: NodeId,
    parent: &str,
    field: Option<&str>,
    tokens: &IndexSet<&str>,
) -> Result<TokenEnumId> {
    let texts: Vec<&str> = tokens.iter().copied().collect();
    let ident = match field {
        None => naming.children_token_type_name(parent, &texts),
        Some(field) => naming.field_token_type_name(parent, field, &texts),
    };

    let mut variants = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let ident = match field {
            None => naming.children_token_name(parent, text, index)?,
            Some(field) => naming.field_token_name(parent, field, text, index)?,
        };
        variants.push(TokenVariant {
            ident,
            text: text.to_string(),
        });
    }

    let qualified = format!("{}.{ident}", graph.node(enclosing).ident);
    Ok(graph.add_token_enum(TokenEnumType {
        ident,
        qualified,
        enclosing,
        field: field.map(str::to_string),
        variants,
        union: None,
        hoisted: false,
    }))
}

fn add_union(
    graph: &mut TypeGraph,
    naming: &dyn NamingPolicy,
    enclosing: NodeId,
    parent: &str,
    field: Option<&str>,
    members: Vec<NodeId>,
    tokens: Option<TokenEnumId>,
) -> UnionId {
    let names: Vec<String> = members
        .iter()
        .map(|&id| graph.node(id).name.clone())
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let ident = match field {
        None => naming.children_type_name(parent, &names),
        Some(field) => naming.field_type_name(parent, field, &names),
    };

    let qualified = format!("{}.{ident}", graph.node(enclosing).ident);
    graph.add_union(UnionType {
        ident,
        qualified,
        enclosing,
        field: field.map(str::to_string),
        members,
        tokens,
        hoisted: false,
    })
}
