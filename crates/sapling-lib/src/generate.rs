//! Model derivation.
//!
//! Pipeline: declare → root → populate → hoist → accessors → closure → promote.
//! Declaration completes before any slot is populated, so slots may refer to
//! types declared later in the schema.

use std::collections::HashMap;

use indexmap::IndexMap;
use sapling_core::{RawNode, parse_node_types};

use crate::accessors::own_methods;
use crate::config::Config;
use crate::graph::{InterfaceId, NodeId, Structure, TypeDescriptor, TypeGraph, TypeKey};
use crate::hoist::apply_hoisting;
use crate::naming::NamingPolicy;
use crate::promote::{
    GeneratedMethod, InterfaceHierarchy, PromotedMethod, SupertypesResolver,
    promote_common_methods,
};
use crate::slot::classify_slot;
use crate::supertypes::{all_supertypes, supertypes_in_order};
use crate::{Error, Result};

const CONFIG_REFERRER: &str = "<config>";

/// The derived wrapper model of one schema.
#[derive(Clone, Debug)]
pub struct Model {
    graph: TypeGraph,
    root: Option<NodeId>,
    methods: IndexMap<NodeId, Vec<GeneratedMethod>>,
    supertypes: IndexMap<TypeKey, Vec<TypeKey>>,
    promoted: IndexMap<TypeKey, Vec<PromotedMethod>>,
}

impl Model {
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Accessors and custom methods `id` declares itself.
    pub fn own_methods(&self, id: NodeId) -> &[GeneratedMethod] {
        self.methods.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ordered supertype closure of a node type or token enum.
    pub fn supertypes(&self, key: TypeKey) -> &[TypeKey] {
        self.supertypes
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `key` implements `interface`, directly or transitively.
    pub fn implements(&self, key: TypeKey, interface: InterfaceId) -> bool {
        all_supertypes(&self.graph, key).contains(&TypeKey::from(interface))
    }

    /// Methods promoted to `interface`.
    pub fn promoted(&self, interface: InterfaceId) -> &[PromotedMethod] {
        self.promoted
            .get(&TypeKey::from(interface))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every interface, unions first, then supertypes in declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceId> + '_ {
        let unions = self.graph.unions().map(|(id, _)| InterfaceId::Union(id));
        let supertypes = self
            .graph
            .nodes()
            .filter(|(_, node)| node.is_supertype())
            .map(|(id, _)| InterfaceId::Supertype(id));
        unions.chain(supertypes)
    }
}

/// Derives the model of `json`, a `node-types.json` document.
pub fn generate_from_json(json: &str, config: &Config, naming: &dyn NamingPolicy) -> Result<Model> {
    let nodes = parse_node_types(json).map_err(|e| Error::Schema(e.to_string()))?;
    generate(&nodes, config, naming)
}

/// Derives the model of the given schema entries.
pub fn generate(nodes: &[RawNode], config: &Config, naming: &dyn NamingPolicy) -> Result<Model> {
    let mut graph = TypeGraph::new(config.aliases.clone());
    let (regular, supertypes) = declare(&mut graph, nodes, naming)?;
    tracing::debug!(
        regular = regular.len(),
        supertypes = supertypes.len(),
        "declared node types"
    );

    let root = resolve_root(&mut graph, nodes, config)?;

    for (id, raw) in &supertypes {
        let mut subtypes = Vec::new();
        for subtype in raw.subtypes.iter().flatten().filter(|s| s.named) {
            let subtype = graph.lookup(&subtype.type_name, &raw.type_name)?;
            if !subtypes.contains(&subtype) {
                subtypes.push(subtype);
            }
        }
        graph.populate_subtypes(*id, subtypes)?;
    }
    for (id, raw) in &regular {
        let children = match &raw.children {
            Some(children) => Some(classify_slot(&mut graph, naming, *id, None, children)?),
            None => None,
        };
        let mut fields = IndexMap::with_capacity(raw.fields.len());
        for (name, slot) in &raw.fields {
            let slot = classify_slot(&mut graph, naming, *id, Some(name.as_str()), slot)?;
            fields.insert(name.clone(), slot);
        }
        graph.populate_structure(*id, Structure { children, fields })?;
    }
    tracing::debug!(
        unions = graph.unions().count(),
        token_enums = graph.token_enums().count(),
        "populated slots"
    );

    apply_hoisting(&mut graph, config.hoist, naming)?;
    ensure_unique_idents(&graph)?;

    let mut methods = IndexMap::with_capacity(graph.node_count());
    for (id, _) in graph.nodes() {
        methods.insert(id, own_methods(&graph, id, config, naming)?);
    }

    let keys: Vec<TypeKey> = graph
        .nodes()
        .map(|(id, _)| TypeKey::Node(id))
        .chain(graph.token_enums().map(|(id, _)| TypeKey::Tokens(id)))
        .collect();
    let mut closure = IndexMap::with_capacity(keys.len());
    for key in keys {
        closure.insert(key, supertypes_in_order(&graph, key)?);
    }

    let hierarchy = Hierarchy::new(&graph, &methods, &closure);
    let interfaces: Vec<TypeKey> = graph
        .unions()
        .map(|(id, _)| TypeKey::Union(id))
        .chain(
            graph
                .nodes()
                .filter(|(_, node)| node.is_supertype())
                .map(|(id, _)| TypeKey::Node(id)),
        )
        .collect();
    let promoted = promote_common_methods(&hierarchy, interfaces)?;
    tracing::debug!(interfaces = promoted.len(), "promoted common methods");

    Ok(Model {
        graph,
        root,
        methods,
        supertypes: closure,
        promoted,
    })
}

type Declared<'a> = Vec<(NodeId, &'a RawNode)>;

/// Declares regular types, then supertypes. Unnamed entries are tokens and
/// get no descriptor.
fn declare<'a>(
    graph: &mut TypeGraph,
    nodes: &'a [RawNode],
    naming: &dyn NamingPolicy,
) -> Result<(Declared<'a>, Declared<'a>)> {
    let mut deferred = Vec::new();
    let mut regular = Vec::new();
    for raw in nodes {
        if !raw.named {
            if raw.has_structure() || raw.is_supertype() {
                return Err(Error::NonNamedWithStructure(raw.type_name.clone()));
            }
            if raw.root {
                return Err(Error::NonNamedRoot(raw.type_name.clone()));
            }
            continue;
        }
        if raw.is_supertype() {
            deferred.push(raw);
            continue;
        }
        let ident = naming.type_name(&raw.type_name);
        let descriptor = TypeDescriptor::regular(&raw.type_name, ident)
            .with_constant(naming.type_name_constant(&raw.type_name))
            .with_extra(raw.extra)
            .with_root(raw.root);
        regular.push((graph.declare(descriptor)?, raw));
    }

    let mut supertypes = Vec::with_capacity(deferred.len());
    for raw in deferred {
        if raw.has_structure() {
            return Err(Error::SupertypeHasStructure(raw.type_name.clone()));
        }
        let found = raw.subtypes.iter().flatten().filter(|s| s.named).count();
        if found < 2 {
            return Err(Error::SupertypeTooFewSubtypes {
                name: raw.type_name.clone(),
                found,
            });
        }
        let ident = naming.type_name(&raw.type_name);
        let descriptor = TypeDescriptor::supertype(&raw.type_name, ident)
            .with_constant(naming.type_name_constant(&raw.type_name))
            .with_extra(raw.extra)
            .with_root(raw.root);
        supertypes.push((graph.declare(descriptor)?, raw));
    }
    Ok((regular, supertypes))
}

/// At most one root: declared by the schema or configured, never both.
fn resolve_root(
    graph: &mut TypeGraph,
    nodes: &[RawNode],
    config: &Config,
) -> Result<Option<NodeId>> {
    let mut declared = nodes.iter().filter(|raw| raw.named && raw.root);
    let first = declared.next();
    if let Some(first) = first
        && let Some(second) = declared.next()
    {
        return Err(Error::ConflictingRoot {
            first: first.type_name.clone(),
            second: second.type_name.clone(),
        });
    }

    match (first, &config.root) {
        (Some(first), Some(configured)) => Err(Error::ConflictingRoot {
            first: first.type_name.clone(),
            second: configured.clone(),
        }),
        (Some(first), _) => Ok(graph.index().get(&first.type_name)),
        (None, Some(configured)) => {
            let id = graph
                .index()
                .get(configured)
                .ok_or_else(|| Error::UnknownType {
                    name: configured.clone(),
                    referrer: CONFIG_REFERRER.to_string(),
                })?;
            graph.mark_root(id);
            Ok(Some(id))
        }
        (None, None) => Ok(None),
    }
}

/// Qualified identifiers are unique across all types.
fn ensure_unique_idents(graph: &TypeGraph) -> Result<()> {
    let keys = graph
        .nodes()
        .map(|(id, _)| TypeKey::Node(id))
        .chain(graph.unions().map(|(id, _)| TypeKey::Union(id)))
        .chain(graph.token_enums().map(|(id, _)| TypeKey::Tokens(id)));

    let mut seen: HashMap<&str, TypeKey> = HashMap::new();
    for key in keys {
        let ident = graph.qualified_ident(key);
        if let Some(&first) = seen.get(ident) {
            return Err(Error::DuplicateIdentifier {
                ident: ident.to_string(),
                first: describe(graph, first),
                second: describe(graph, key),
            });
        }
        seen.insert(ident, key);
    }
    Ok(())
}

fn describe(graph: &TypeGraph, key: TypeKey) -> String {
    match key {
        TypeKey::Node(id) => format!("'{}'", graph.node(id).name),
        TypeKey::Union(id) => {
            let enclosing = graph.union(id).enclosing;
            format!("a union of '{}'", graph.node(enclosing).name)
        }
        TypeKey::Tokens(id) => {
            let enclosing = graph.token_enum(id).enclosing;
            format!("a token enum of '{}'", graph.node(enclosing).name)
        }
    }
}

/// Promotion view of a populated graph.
struct Hierarchy<'a> {
    graph: &'a TypeGraph,
    methods: &'a IndexMap<NodeId, Vec<GeneratedMethod>>,
    supertypes: HashMap<String, Vec<String>>,
}

impl<'a> Hierarchy<'a> {
    fn new(
        graph: &'a TypeGraph,
        methods: &'a IndexMap<NodeId, Vec<GeneratedMethod>>,
        closure: &IndexMap<TypeKey, Vec<TypeKey>>,
    ) -> Self {
        let supertypes = closure
            .iter()
            .map(|(&key, ordered)| {
                let ident = graph.qualified_ident(key).to_string();
                let ordered = ordered
                    .iter()
                    .map(|&s| graph.qualified_ident(s).to_string())
                    .collect();
                (ident, ordered)
            })
            .collect();
        Self {
            graph,
            methods,
            supertypes,
        }
    }
}

impl SupertypesResolver for Hierarchy<'_> {
    fn supertypes(&self, name: &str) -> Option<Vec<String>> {
        self.supertypes.get(name).cloned()
    }
}

impl InterfaceHierarchy for Hierarchy<'_> {
    type Member = TypeKey;

    fn subtypes(&self, interface: TypeKey) -> Vec<TypeKey> {
        match interface {
            TypeKey::Union(id) => {
                let union = self.graph.union(id);
                union
                    .members
                    .iter()
                    .map(|&member| TypeKey::Node(member))
                    .chain(union.tokens.map(TypeKey::Tokens))
                    .collect()
            }
            TypeKey::Node(id) => self
                .graph
                .subtypes(id)
                .map(|subtypes| subtypes.iter().map(|&s| TypeKey::Node(s)).collect())
                .unwrap_or_default(),
            TypeKey::Tokens(_) => Vec::new(),
        }
    }

    fn is_interface(&self, member: TypeKey) -> bool {
        match member {
            TypeKey::Union(_) => true,
            TypeKey::Node(id) => self.graph.node(id).is_supertype(),
            TypeKey::Tokens(_) => false,
        }
    }

    fn own_methods(&self, member: TypeKey) -> Vec<GeneratedMethod> {
        match member {
            TypeKey::Node(id) => self.methods.get(&id).cloned().unwrap_or_default(),
            TypeKey::Union(_) | TypeKey::Tokens(_) => Vec::new(),
        }
    }

    fn describe(&self, member: TypeKey) -> String {
        self.graph.qualified_ident(member).to_string()
    }
}
