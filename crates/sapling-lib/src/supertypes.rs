//! Supertype closure: every interface a type implements, directly or not.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::Result;
use crate::graph::{TypeGraph, TypeKey};
use crate::topo::{UnknownReference, topo_sort};

/// Interfaces `key` implements directly, in the order they were added.
///
/// Node types implement their supertypes and the unions that list them; a
/// token enum implements the union of its slot, if any. Unions implement
/// nothing.
pub fn direct_supertypes(graph: &TypeGraph, key: TypeKey) -> Vec<TypeKey> {
    match key {
        TypeKey::Node(id) => graph
            .node(id)
            .interfaces()
            .iter()
            .map(|&interface| interface.into())
            .collect(),
        TypeKey::Tokens(id) => graph
            .token_enum(id)
            .union
            .map(TypeKey::Union)
            .into_iter()
            .collect(),
        TypeKey::Union(_) => Vec::new(),
    }
}

/// Every interface `key` reaches, transitively. Never contains `key`
/// itself, even when supertypes form a cycle through it.
pub fn all_supertypes(graph: &TypeGraph, key: TypeKey) -> IndexSet<TypeKey> {
    let mut result = IndexSet::new();
    let mut visited = HashSet::from([key]);
    let mut stack: Vec<TypeKey> = direct_supertypes(graph, key).into_iter().rev().collect();
    while let Some(next) = stack.pop() {
        if !visited.insert(next) {
            continue;
        }
        result.insert(next);
        stack.extend(direct_supertypes(graph, next).into_iter().rev());
    }
    result
}

/// The closure of `key`, each interface listed before the interfaces it
/// implements itself.
///
/// This is the order return types widen in: the first interface shared by
/// all candidates is the most specific one.
pub fn supertypes_in_order(graph: &TypeGraph, key: TypeKey) -> Result<Vec<TypeKey>> {
    let mut ordered = topo_sort(
        direct_supertypes(graph, key),
        |&supertype| direct_supertypes(graph, supertype),
        UnknownReference::Add,
    )?;
    ordered.retain(|&supertype| supertype != key);
    Ok(ordered)
}
