//! Common return type of one method across several implementors.
//!
//! A promoted method must never promise more than every implementor can
//! honestly return. Named types may widen to a shared supertype; container
//! arguments that widen become covariant; everything else must match
//! exactly.

use std::collections::HashMap;

use indexmap::IndexSet;

use super::method::TypeRef;

/// Ordered supertypes of a named type, most specific first.
pub trait SupertypesResolver {
    /// `None` when the type is unknown to this resolver.
    fn supertypes(&self, name: &str) -> Option<Vec<String>>;
}

impl SupertypesResolver for HashMap<String, Vec<String>> {
    fn supertypes(&self, name: &str) -> Option<Vec<String>> {
        self.get(name).cloned()
    }
}

/// Resolver that knows no supertypes; only identical types are compatible.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSupertypes;

impl SupertypesResolver for NoSupertypes {
    fn supertypes(&self, _name: &str) -> Option<Vec<String>> {
        None
    }
}

/// Outcome of resolving the return types collected for one signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommonReturn {
    Void,
    Type(TypeRef),
    /// Shapes, annotations or types disagree; the method is not promoted.
    Incompatible,
}

struct Resolved {
    ty: TypeRef,
    /// Not every input was exactly this type.
    widened: bool,
}

/// Resolve the common return type of `returns` (`None` meaning void).
pub fn common_return_type<'a>(
    returns: impl IntoIterator<Item = &'a Option<TypeRef>>,
    resolver: &dyn SupertypesResolver,
) -> CommonReturn {
    let returns: Vec<&Option<TypeRef>> = returns.into_iter().collect();
    if returns.is_empty() {
        return CommonReturn::Incompatible;
    }
    if returns.iter().all(|r| r.is_none()) {
        return CommonReturn::Void;
    }

    let Some(types) = returns
        .iter()
        .map(|r| r.as_ref())
        .collect::<Option<Vec<&TypeRef>>>()
    else {
        return CommonReturn::Incompatible;
    };

    match common_type(&types, resolver) {
        Some(resolved) => CommonReturn::Type(resolved.ty),
        None => CommonReturn::Incompatible,
    }
}

fn common_type(types: &[&TypeRef], resolver: &dyn SupertypesResolver) -> Option<Resolved> {
    let covariant = types.iter().any(|t| matches!(t, TypeRef::Covariant(_)));
    let exact: Vec<&TypeRef> = types.iter().map(|t| t.exact()).collect();
    let first = *exact.first()?;

    if exact.iter().all(|t| *t == first) {
        return Some(Resolved {
            ty: first.clone(),
            widened: covariant,
        });
    }

    let annotations = first.annotations();
    if exact.iter().any(|t| t.annotations() != annotations) {
        return None;
    }

    match first {
        TypeRef::Named { .. } => {
            let names = exact
                .iter()
                .map(|t| match t {
                    TypeRef::Named { name, .. } => Some(name.as_str()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            let name = common_supertype(&names, resolver)?;
            Some(Resolved {
                ty: TypeRef::Named {
                    name,
                    annotations: annotations.to_vec(),
                },
                widened: true,
            })
        }
        TypeRef::Container { args, .. } => {
            let arity = args.len();
            let mut raws = Vec::with_capacity(exact.len());
            let mut arg_columns: Vec<Vec<&TypeRef>> = vec![Vec::with_capacity(exact.len()); arity];
            for ty in &exact {
                let TypeRef::Container { raw, args, .. } = ty else {
                    return None;
                };
                if args.len() != arity {
                    return None;
                }
                raws.push(raw.as_str());
                for (column, arg) in arg_columns.iter_mut().zip(args) {
                    column.push(arg);
                }
            }

            let raw = common_supertype(&raws, resolver)?;
            let mut widened = raws.iter().any(|r| *r != raw);
            let mut resolved_args = Vec::with_capacity(arity);
            for column in &arg_columns {
                let arg = common_type(column, resolver)?;
                if arg.widened {
                    widened = true;
                    resolved_args.push(arg.ty.covariant());
                } else {
                    resolved_args.push(arg.ty);
                }
            }

            Some(Resolved {
                ty: TypeRef::Container {
                    raw,
                    args: resolved_args,
                    annotations: annotations.to_vec(),
                },
                widened,
            })
        }
        // Opaque types only match when identical, which was checked above.
        TypeRef::Opaque(_) | TypeRef::Covariant(_) => None,
    }
}

/// Most specific name shared by every `names[i]` or one of its supertypes.
fn common_supertype(names: &[&str], resolver: &dyn SupertypesResolver) -> Option<String> {
    let (first, rest) = names.split_first()?;
    if rest.iter().all(|n| n == first) {
        return Some((*first).to_string());
    }

    let mut choices = with_supertypes(first, resolver);
    for name in rest {
        let own = with_supertypes(name, resolver);
        choices.retain(|c| own.contains(c));
        if choices.is_empty() {
            return None;
        }
    }
    choices.into_iter().next()
}

fn with_supertypes(name: &str, resolver: &dyn SupertypesResolver) -> IndexSet<String> {
    let mut set = IndexSet::new();
    set.insert(name.to_string());
    set.extend(resolver.supertypes(name).unwrap_or_default());
    set
}
