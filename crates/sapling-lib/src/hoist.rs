//! Where synthesized types are declared.
//!
//! A synthesized type is nested inside its enclosing node type unless it is
//! hoisted to top level. Nesting is preferred, but a union nested in `A`
//! that (directly or through other unions and supertypes) has `A` as a
//! member would make `A` implement a type declared inside itself, which
//! most targets reject.

use std::collections::HashSet;

use crate::Result;
use crate::graph::{NodeId, SlotType, TypeGraph, TypeKey};
use crate::naming::NamingPolicy;

/// When synthesized types are hoisted to top level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoistPolicy {
    Never,
    Always,
    /// Only unions whose members refer back to the enclosing type.
    #[default]
    AsNeeded,
}

/// Whether `key` is `target`, or reaches it through an interface.
///
/// A regular node type reaches `target` through the unions of its slots,
/// a supertype through any of its subtypes, a union through any member.
/// Slots returning a node type directly and token enums never do: they
/// create no implements-relation. `seen` guards against cycles and is
/// shared across the whole query.
pub fn refers_to(
    graph: &TypeGraph,
    key: TypeKey,
    target: NodeId,
    seen: &mut HashSet<TypeKey>,
) -> Result<bool> {
    if !seen.insert(key) {
        return Ok(false);
    }
    match key {
        TypeKey::Node(id) if id == target => Ok(true),
        TypeKey::Node(id) if graph.node(id).is_supertype() => {
            for &subtype in graph.subtypes(id)? {
                if refers_to(graph, TypeKey::Node(subtype), target, seen)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        TypeKey::Node(id) => {
            let Some(structure) = graph.structure(id)? else {
                return Ok(false);
            };
            for slot in structure.slots() {
                if let SlotType::Union(union) = slot.slot_type
                    && refers_to(graph, TypeKey::Union(union), target, seen)?
                {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        TypeKey::Union(id) => {
            for &member in &graph.union(id).members {
                if refers_to(graph, TypeKey::Node(member), target, seen)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        TypeKey::Tokens(_) => Ok(false),
    }
}

/// Whether the synthesized type `key` must be declared at top level.
pub fn must_hoist(graph: &TypeGraph, key: TypeKey, policy: HoistPolicy) -> Result<bool> {
    match (policy, key) {
        (HoistPolicy::Never, _) => Ok(false),
        (HoistPolicy::Always, _) => Ok(true),
        (HoistPolicy::AsNeeded, TypeKey::Union(id)) => {
            let union = graph.union(id);
            if union.members.contains(&union.enclosing) {
                return Ok(true);
            }
            for &member in &union.members {
                let mut seen = HashSet::new();
                if refers_to(graph, TypeKey::Node(member), union.enclosing, &mut seen)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        (HoistPolicy::AsNeeded, _) => Ok(false),
    }
}

/// Decides placement of every synthesized type and assigns qualified
/// identifiers accordingly. Requires all node types to be populated.
pub fn apply_hoisting(
    graph: &mut TypeGraph,
    policy: HoistPolicy,
    naming: &dyn NamingPolicy,
) -> Result<()> {
    let unions: Vec<_> = graph.unions().map(|(id, _)| id).collect();
    for id in unions {
        let hoisted = must_hoist(graph, TypeKey::Union(id), policy)?;
        let enclosing = graph.node(graph.union(id).enclosing).ident.clone();
        let union = graph.union_mut(id);
        union.hoisted = hoisted;
        union.qualified = qualify(naming, &enclosing, &union.ident, hoisted);
        if hoisted {
            tracing::debug!(union = %union.qualified, "hoisted to top level");
        }
    }

    let token_enums: Vec<_> = graph.token_enums().map(|(id, _)| id).collect();
    for id in token_enums {
        let hoisted = must_hoist(graph, TypeKey::Tokens(id), policy)?;
        let enclosing = graph.node(graph.token_enum(id).enclosing).ident.clone();
        let tokens = graph.token_enum_mut(id);
        tokens.hoisted = hoisted;
        tokens.qualified = qualify(naming, &enclosing, &tokens.ident, hoisted);
    }
    Ok(())
}

fn qualify(naming: &dyn NamingPolicy, enclosing: &str, ident: &str, hoisted: bool) -> String {
    if hoisted {
        naming.hoisted_type_name(enclosing, ident)
    } else {
        format!("{enclosing}.{ident}")
    }
}
