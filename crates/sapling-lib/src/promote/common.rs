//! Common-method promotion over an interface hierarchy.
//!
//! Interfaces are processed leaves first, so an interface that is itself a
//! subtype of another contributes its already promoted methods as if it had
//! declared them.

use std::fmt::Display;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use super::method::{GeneratedMethod, MethodKey, TypeRef};
use super::return_type::{CommonReturn, SupertypesResolver, common_return_type};
use crate::topo::{UnknownReference, topo_sort};
use crate::{Error, Result};

/// The view of a type graph that promotion needs.
pub trait InterfaceHierarchy: SupertypesResolver {
    type Member: Copy + Eq + Hash + Display;

    /// Direct subtypes of `interface`, in declaration order.
    fn subtypes(&self, interface: Self::Member) -> Vec<Self::Member>;

    fn is_interface(&self, member: Self::Member) -> bool;

    /// Methods `member` generates itself, excluding promoted ones.
    fn own_methods(&self, member: Self::Member) -> Vec<GeneratedMethod>;

    /// Human readable name of `member` for diagnostics.
    fn describe(&self, member: Self::Member) -> String {
        member.to_string()
    }
}

/// Promoted methods per interface. Interfaces without any promoted method
/// are absent.
pub fn promote_common_methods<H: InterfaceHierarchy>(
    hierarchy: &H,
    interfaces: impl IntoIterator<Item = H::Member>,
) -> Result<IndexMap<H::Member, Vec<GeneratedMethod>>> {
    let ordered = topo_sort(
        interfaces,
        |&interface| {
            hierarchy
                .subtypes(interface)
                .into_iter()
                .filter(|&s| hierarchy.is_interface(s))
                .collect::<Vec<_>>()
        },
        UnknownReference::Add,
    )?;

    let mut promoted: IndexMap<H::Member, Vec<GeneratedMethod>> = IndexMap::new();
    for interface in ordered.into_iter().rev() {
        let methods = promote_for(hierarchy, interface, &promoted)?;
        if !methods.is_empty() {
            tracing::debug!(%interface, count = methods.len(), "promoted common methods");
            promoted.insert(interface, methods);
        }
    }
    Ok(promoted)
}

fn promote_for<H: InterfaceHierarchy>(
    hierarchy: &H,
    interface: H::Member,
    promoted: &IndexMap<H::Member, Vec<GeneratedMethod>>,
) -> Result<Vec<GeneratedMethod>> {
    let mut candidates: Option<IndexMap<MethodKey, IndexSet<Option<TypeRef>>>> = None;

    for subtype in hierarchy.subtypes(interface) {
        let methods = methods_of(hierarchy, subtype, promoted)?;
        match candidates.as_mut() {
            None => {
                candidates = Some(
                    methods
                        .into_iter()
                        .map(|(key, ret)| (key, IndexSet::from([ret])))
                        .collect(),
                );
            }
            Some(candidates) => {
                candidates.retain(|key, returns| match methods.get(key) {
                    Some(ret) => {
                        returns.insert(ret.clone());
                        true
                    }
                    None => {
                        tracing::trace!(%interface, %subtype, method = %key.signature, "not declared by every subtype");
                        false
                    }
                });
            }
        }
        if candidates.as_ref().is_some_and(IndexMap::is_empty) {
            break;
        }
    }

    let mut result = Vec::new();
    for (key, returns) in candidates.unwrap_or_default() {
        let return_type = match common_return_type(&returns, hierarchy) {
            CommonReturn::Void => None,
            CommonReturn::Type(ty) => Some(ty),
            CommonReturn::Incompatible => {
                tracing::debug!(%interface, method = %key.signature, "return types have no common type");
                continue;
            }
        };
        result.push(GeneratedMethod::new(key.kind, key.signature, return_type));
    }
    Ok(result)
}

/// Own plus already promoted methods of `member`, keyed for comparison.
fn methods_of<H: InterfaceHierarchy>(
    hierarchy: &H,
    member: H::Member,
    promoted: &IndexMap<H::Member, Vec<GeneratedMethod>>,
) -> Result<IndexMap<MethodKey, Option<TypeRef>>> {
    let own = hierarchy.own_methods(member);
    let inherited = promoted.get(&member).map(Vec::as_slice).unwrap_or_default();

    let mut keyed = IndexMap::with_capacity(own.len() + inherited.len());
    for method in own.iter().chain(inherited) {
        if keyed
            .insert(method.key(), method.return_type.clone())
            .is_some()
        {
            return Err(Error::DuplicateMethod {
                method: method.signature.to_string(),
                owner: hierarchy.describe(member),
            });
        }
    }
    Ok(keyed)
}
