//! Methods a node type's wrapper declares itself.

use sapling_core::Cardinality;

use crate::Result;
use crate::config::{Config, OptionalStyle};
use crate::graph::{NodeId, ResolvedSlot, SlotType, TypeGraph, TypeKey};
use crate::naming::NamingPolicy;
use crate::promote::{GeneratedMethod, MethodKind, Signature, TypeRef};

pub const LIST: &str = "List";
pub const OPTIONAL: &str = "Optional";
pub const NON_EMPTY: &str = "NonEmpty";
pub const NULLABLE: &str = "Nullable";

/// Return type of an accessor yielding `element` with `cardinality`.
pub fn accessor_return_type(
    element: TypeRef,
    cardinality: Cardinality,
    style: OptionalStyle,
) -> TypeRef {
    match (cardinality.multiple, cardinality.required, style) {
        (true, true, _) => TypeRef::container(LIST, vec![element]).annotated(NON_EMPTY),
        (true, false, _) => TypeRef::container(LIST, vec![element]),
        (false, true, _) => element,
        (false, false, OptionalStyle::Wrapper) => TypeRef::container(OPTIONAL, vec![element]),
        (false, false, OptionalStyle::Annotation) => element.annotated(NULLABLE),
    }
}

/// Accessors for the slots of `id`, children first, then the configured
/// custom methods. Supertypes only get custom methods.
pub fn own_methods(
    graph: &TypeGraph,
    id: NodeId,
    config: &Config,
    naming: &dyn NamingPolicy,
) -> Result<Vec<GeneratedMethod>> {
    let node = graph.node(id);
    let mut methods = Vec::new();

    if let Some(structure) = graph.structure(id)? {
        for slot in structure.slots() {
            methods.push(accessor(graph, &node.name, slot, config, naming));
        }
    }

    if let Some(custom) = config.custom_methods.get(&node.name) {
        methods.extend(custom.iter().map(|method| {
            GeneratedMethod::new(
                MethodKind::Custom,
                method.signature.clone(),
                method.return_type.clone(),
            )
        }));
    }
    Ok(methods)
}

fn accessor(
    graph: &TypeGraph,
    parent: &str,
    slot: &ResolvedSlot,
    config: &Config,
    naming: &dyn NamingPolicy,
) -> GeneratedMethod {
    let members = member_names(graph, slot.slot_type);
    let members: Vec<&str> = members.iter().map(String::as_str).collect();
    let element = TypeRef::named(graph.qualified_ident(TypeKey::from(slot.slot_type)));
    let return_type = accessor_return_type(element, slot.cardinality, config.optional_style);

    let (name, kind) = match &slot.field {
        None => (
            naming.children_getter_name(parent, &members, slot.cardinality),
            MethodKind::Children(slot.cardinality),
        ),
        Some(field) => (
            naming.field_getter_name(parent, field, &members, slot.cardinality),
            MethodKind::Field {
                name: field.clone(),
                cardinality: slot.cardinality,
            },
        ),
    };
    GeneratedMethod::new(kind, Signature::new(name), Some(return_type))
}

/// Schema names of the named types a slot permits.
fn member_names(graph: &TypeGraph, slot_type: SlotType) -> Vec<String> {
    match slot_type {
        SlotType::Node(id) => vec![graph.node(id).name.clone()],
        SlotType::Union(id) => graph
            .union(id)
            .members
            .iter()
            .map(|&member| graph.node(member).name.clone())
            .collect(),
        SlotType::Tokens(_) => Vec::new(),
    }
}
