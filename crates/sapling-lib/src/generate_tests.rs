use indoc::indoc;
use sapling_core::{RawCardinality, RawNode, RawTypeRef};

use crate::config::{Config, CustomMethod};
use crate::generate::{Model, generate, generate_from_json};
use crate::graph::{InterfaceId, SlotType, TypeKey};
use crate::naming::DefaultNaming;
use crate::promote::{PromotedMethod, TypeRef};
use crate::{Error, Result};

fn regular(name: &str) -> RawNode {
    RawNode::new(name, true)
}

fn supertype(name: &str, subtypes: &[&str]) -> RawNode {
    RawNode::new(name, true).with_subtypes(subtypes.iter().map(|&s| RawTypeRef::named(s)).collect())
}

fn one(names: &[&str]) -> RawCardinality {
    RawCardinality::new(
        false,
        true,
        names.iter().map(|&s| RawTypeRef::named(s)).collect(),
    )
}

fn derive(nodes: &[RawNode], config: &Config) -> Result<Model> {
    generate(nodes, config, &DefaultNaming::new())
}

fn promoted(model: &Model, supertype: &str) -> Vec<String> {
    let id = model.graph().lookup(supertype, "test").unwrap();
    model
        .promoted(InterfaceId::Supertype(id))
        .iter()
        .map(|m| m.to_string())
        .collect()
}

#[test]
fn promotes_identical_accessors_to_supertype() {
    let nodes = [
        regular("t1").with_field("value", one(&["number"])),
        regular("t2").with_field("value", one(&["number"])),
        regular("number"),
        supertype("_s", &["t1", "t2"]),
    ];
    let model = derive(&nodes, &Config::new()).unwrap();
    assert_eq!(
        promoted(&model, "_s"),
        ["get_value(): NodeNumber [field value]"]
    );
}

#[test]
fn custom_methods_promote_with_common_return_type() {
    let integer = || CustomMethod::new("f").returns(TypeRef::opaque("Integer"));
    let nodes = [
        regular("t1"),
        regular("t2"),
        regular("t3"),
        supertype("_s", &["t1", "t2"]),
        supertype("_s2", &["t1", "t3"]),
    ];
    let config = Config::new()
        .custom_method("t1", integer())
        .custom_method("t2", integer())
        .custom_method(
            "t3",
            CustomMethod::new("f").returns(TypeRef::opaque("String")),
        );
    let model = derive(&nodes, &config).unwrap();

    assert_eq!(promoted(&model, "_s"), ["f(): Integer [custom]"]);
    assert!(promoted(&model, "_s2").is_empty());
}

#[test]
fn accessors_widen_to_shared_supertype() {
    let nodes = [
        regular("t1").with_field("value", one(&["integer"])),
        regular("t2").with_field("value", one(&["float"])),
        regular("integer"),
        regular("float"),
        supertype("_s", &["t1", "t2"]),
        supertype("_number", &["integer", "float"]),
    ];
    let model = derive(&nodes, &Config::new()).unwrap();
    assert_eq!(
        promoted(&model, "_s"),
        ["get_value(): NodeNumber [field value]"]
    );
}

#[test]
fn nested_supertype_contributes_promoted_methods() {
    let nodes = [
        regular("a").with_field("name", one(&["identifier"])),
        regular("b").with_field("name", one(&["identifier"])),
        regular("c").with_field("name", one(&["identifier"])),
        regular("identifier"),
        supertype("_outer", &["_inner", "c"]),
        supertype("_inner", &["a", "b"]),
    ];
    let model = derive(&nodes, &Config::new()).unwrap();
    let expected = ["get_name(): NodeIdentifier [field name]"];
    assert_eq!(promoted(&model, "_inner"), expected);
    assert_eq!(promoted(&model, "_outer"), expected);
}

#[test]
fn single_named_reference_synthesizes_nothing() {
    let nodes = [regular("a").with_field("x", one(&["b"])), regular("b")];
    let model = derive(&nodes, &Config::new()).unwrap();
    assert_eq!(model.graph().unions().count(), 0);
    assert_eq!(model.graph().token_enums().count(), 0);
    assert_eq!(model.interfaces().count(), 0);
}

#[test]
fn alias_resolves_missing_reference() {
    let nodes = [regular("a").with_field("x", one(&["foo"])), regular("bar")];

    let err = derive(&nodes, &Config::new()).unwrap_err();
    insta::assert_snapshot!(err, @"unknown node type 'foo' referenced by 'a'");

    let model = derive(&nodes, &Config::new().alias("foo", "bar")).unwrap();
    let graph = model.graph();
    let a = graph.lookup("a", "test").unwrap();
    let slot = &graph.structure(a).unwrap().unwrap().fields["x"];
    assert_eq!(
        slot.slot_type,
        SlotType::Node(graph.lookup("bar", "test").unwrap())
    );
}

#[test]
fn alias_chain_fails() {
    let nodes = [regular("a").with_field("x", one(&["foo"])), regular("baz")];
    let config = Config::new().alias("foo", "bar").alias("bar", "baz");
    let err = derive(&nodes, &config).unwrap_err();
    assert_eq!(
        err,
        Error::AliasCycle {
            name: "foo".to_string(),
            target: "bar".to_string(),
            referrer: "a".to_string(),
        }
    );
}

#[test]
fn supertype_may_be_referenced_before_declaration() {
    let nodes = [
        regular("program").with_field("body", one(&["_statement"])),
        regular("a"),
        regular("b"),
        supertype("_statement", &["a", "b"]),
    ];
    let model = derive(&nodes, &Config::new()).unwrap();
    let graph = model.graph();
    let program = graph.lookup("program", "test").unwrap();
    let slot = &graph.structure(program).unwrap().unwrap().fields["body"];
    let statement = graph.lookup("_statement", "test").unwrap();
    assert_eq!(slot.slot_type, SlotType::Node(statement));
    assert_eq!(model.interfaces().count(), 1);
}

#[test]
fn duplicate_type() {
    let nodes = [regular("a"), regular("a")];
    assert_eq!(
        derive(&nodes, &Config::new()).unwrap_err(),
        Error::DuplicateType("a".to_string())
    );
}

#[test]
fn duplicate_between_regular_and_supertype() {
    let nodes = [regular("a"), regular("b"), supertype("a", &["a", "b"])];
    assert_eq!(
        derive(&nodes, &Config::new()).unwrap_err(),
        Error::DuplicateType("a".to_string())
    );
}

#[test]
fn tokens_with_structure_are_rejected() {
    let nodes = [RawNode::new("+", false).with_field("x", one(&["a"])), regular("a")];
    assert_eq!(
        derive(&nodes, &Config::new()).unwrap_err(),
        Error::NonNamedWithStructure("+".to_string())
    );
}

#[test]
fn plain_tokens_are_skipped() {
    let nodes = [RawNode::new("+", false), regular("a")];
    let model = derive(&nodes, &Config::new()).unwrap();
    assert_eq!(model.graph().node_count(), 1);
}

#[test]
fn supertype_needs_two_named_subtypes() {
    let nodes = [
        regular("a"),
        RawNode::new("_s", true).with_subtypes(vec![RawTypeRef::named("a"), RawTypeRef::token("+")]),
    ];
    let err = derive(&nodes, &Config::new()).unwrap_err();
    insta::assert_snapshot!(err, @"supertype '_s' must have at least 2 named subtypes, found 1");
}

#[test]
fn supertype_with_structure_is_rejected() {
    let nodes = [
        regular("a"),
        regular("b"),
        supertype("_s", &["a", "b"]).with_field("x", one(&["a"])),
    ];
    assert_eq!(
        derive(&nodes, &Config::new()).unwrap_err(),
        Error::SupertypeHasStructure("_s".to_string())
    );
}

#[test]
fn schema_root_is_marked() {
    let nodes = [regular("program").with_root(true), regular("a")];
    let model = derive(&nodes, &Config::new()).unwrap();
    let root = model.root().unwrap();
    assert_eq!(model.graph().node(root).name, "program");
    assert!(model.graph().node(root).root);
}

#[test]
fn configured_root_is_marked() {
    let nodes = [regular("program"), regular("a")];
    let model = derive(&nodes, &Config::new().root("program")).unwrap();
    let root = model.root().unwrap();
    assert!(model.graph().node(root).root);

    let err = derive(&nodes, &Config::new().root("missing")).unwrap_err();
    insta::assert_snapshot!(err, @"unknown node type 'missing' referenced by '<config>'");
}

#[test]
fn conflicting_roots() {
    let nodes = [regular("a").with_root(true), regular("b").with_root(true)];
    assert_eq!(
        derive(&nodes, &Config::new()).unwrap_err(),
        Error::ConflictingRoot {
            first: "a".to_string(),
            second: "b".to_string(),
        }
    );

    let nodes = [regular("a").with_root(true), regular("b")];
    assert_eq!(
        derive(&nodes, &Config::new().root("b")).unwrap_err(),
        Error::ConflictingRoot {
            first: "a".to_string(),
            second: "b".to_string(),
        }
    );
    assert_eq!(
        derive(&nodes, &Config::new().root("a")).unwrap_err(),
        Error::ConflictingRoot {
            first: "a".to_string(),
            second: "a".to_string(),
        }
    );
}

#[test]
fn tokens_cannot_be_the_root() {
    let nodes = [RawNode::new("+", false).with_root(true), regular("a")];
    let err = derive(&nodes, &Config::new()).unwrap_err();
    insta::assert_snapshot!(err, @"non-named node type '+' must not be the root");
}

#[test]
fn hoisted_union_clashing_with_node_type() {
    let children = RawCardinality::new(
        true,
        false,
        vec![RawTypeRef::named("a"), RawTypeRef::named("a_child")],
    );
    let nodes = [regular("a").with_children(children), regular("a_child")];
    let err = derive(&nodes, &Config::new()).unwrap_err();
    insta::assert_snapshot!(err, @"identifier 'NodeAChild' is generated for both 'a_child' and a union of 'a'");
}

#[test]
fn supertype_clashing_with_node_type() {
    let nodes = [
        regular("expr"),
        regular("a"),
        regular("b"),
        supertype("_expr", &["a", "b"]),
    ];
    assert_eq!(
        derive(&nodes, &Config::new()).unwrap_err(),
        Error::DuplicateIdentifier {
            ident: "NodeExpr".to_string(),
            first: "'expr'".to_string(),
            second: "'_expr'".to_string(),
        }
    );
}

#[test]
fn mixed_union_promotes_nothing() {
    let json = indoc! {r#"
        [
          {
            "type": "block",
            "named": true,
            "children": {
              "multiple": true,
              "required": false,
              "types": [
                {"type": "a", "named": true},
                {"type": "b", "named": true},
                {"type": ";", "named": false}
              ]
            }
          },
          {"type": "a", "named": true, "fields": {"x": {"multiple": false, "required": true, "types": [{"type": "b", "named": true}]}}},
          {"type": "b", "named": true, "fields": {"x": {"multiple": false, "required": true, "types": [{"type": "b", "named": true}]}}},
          {"type": ";", "named": false}
        ]
    "#};
    let model = generate_from_json(json, &Config::new(), &DefaultNaming::new()).unwrap();
    let (union, _) = model.graph().unions().next().unwrap();
    assert!(model.promoted(InterfaceId::Union(union)).is_empty());
}

#[test]
fn union_of_named_types_promotes() {
    let json = indoc! {r#"
        [
          {
            "type": "block",
            "named": true,
            "children": {
              "multiple": true,
              "required": false,
              "types": [{"type": "a", "named": true}, {"type": "b", "named": true}]
            }
          },
          {"type": "a", "named": true, "fields": {"x": {"multiple": false, "required": true, "types": [{"type": "c", "named": true}]}}},
          {"type": "b", "named": true, "fields": {"x": {"multiple": false, "required": true, "types": [{"type": "c", "named": true}]}}},
          {"type": "c", "named": true}
        ]
    "#};
    let model = generate_from_json(json, &Config::new(), &DefaultNaming::new()).unwrap();
    let (union, _) = model.graph().unions().next().unwrap();
    let promoted: Vec<String> = model
        .promoted(InterfaceId::Union(union))
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(promoted, ["get_x(): NodeC [field x]"]);
}

#[test]
fn malformed_json_is_a_schema_error() {
    let err = generate_from_json("[{\"type\": 1}]", &Config::new(), &DefaultNaming::new())
        .unwrap_err();
    assert!(matches!(err, Error::Schema(_)), "{err:?}");
}

#[test]
fn token_enum_implements_its_union() {
    let json = indoc! {r#"
        [
          {
            "type": "block",
            "named": true,
            "children": {
              "multiple": true,
              "required": false,
              "types": [{"type": "a", "named": true}, {"type": "{", "named": false}]
            }
          },
          {"type": "a", "named": true}
        ]
    "#};
    let model = generate_from_json(json, &Config::new(), &DefaultNaming::new()).unwrap();
    let (tokens, enum_type) = model.graph().token_enums().next().unwrap();
    let union = enum_type.union.unwrap();
    assert!(model.implements(TypeKey::Tokens(tokens), InterfaceId::Union(union)));
    assert_eq!(enum_type.variants[0].ident, "LEFT_CURLY_BRACKET");
}

#[test]
fn name_constants_are_assigned() {
    let nodes = [
        regular("call").with_field("type_arguments", one(&["identifier"])),
        regular("identifier"),
    ];
    let model = derive(&nodes, &Config::new()).unwrap();
    let graph = model.graph();
    let call = graph.lookup("call", "test").unwrap();

    assert_eq!(graph.node(call).constant.as_deref(), Some("TYPE_NAME"));
    let slot = &graph.structure(call).unwrap().unwrap().fields["type_arguments"];
    assert_eq!(slot.constant.as_deref(), Some("FIELD_TYPE_ARGUMENTS"));
}

/// One subtype of `_s`: return type of its custom method `f` and the
/// target of its `value` field, each possibly absent.
type SubtypeShape = (Option<&'static str>, Option<&'static str>);

const CUSTOM_RETURNS: [Option<&str>; 3] = [None, Some("Integer"), Some("String")];
const VALUE_TARGETS: [Option<&str>; 3] = [None, Some("integer"), Some("float")];

fn promoted_for_shape(shape: &[SubtypeShape]) -> Vec<PromotedMethod> {
    let mut nodes = Vec::new();
    let mut config = Config::new();
    let mut subtypes = Vec::new();
    for (i, &(custom, value)) in shape.iter().enumerate() {
        let name = format!("t{i}");
        let mut node = regular(&name);
        if let Some(target) = value {
            node = node.with_field("value", one(&[target]));
        }
        if let Some(ret) = custom {
            let method = CustomMethod::new("f").returns(TypeRef::opaque(ret));
            config = config.custom_method(&name, method);
        }
        nodes.push(node);
        subtypes.push(name);
    }
    let subtypes: Vec<&str> = subtypes.iter().map(String::as_str).collect();
    nodes.extend([
        regular("integer"),
        regular("float"),
        supertype("_number", &["integer", "float"]),
        supertype("_s", &subtypes),
    ]);

    let model = derive(&nodes, &config).unwrap();
    let id = model.graph().lookup("_s", "test").unwrap();
    model.promoted(InterfaceId::Supertype(id)).to_vec()
}

fn method_keys(methods: &[PromotedMethod]) -> Vec<String> {
    methods
        .iter()
        .map(|m| format!("{} [{}]", m.signature, m.kind))
        .collect()
}

#[test]
fn removing_a_subtype_keeps_every_promoted_signature() {
    let variants: Vec<SubtypeShape> = CUSTOM_RETURNS
        .iter()
        .flat_map(|&custom| VALUE_TARGETS.iter().map(move |&value| (custom, value)))
        .collect();
    let base = variants.len();

    let mut checked = 0;
    let mut widened = 0;
    for len in 3..=4u32 {
        for code in 0..base.pow(len) {
            let shape: Vec<SubtypeShape> = (0..len)
                .map(|i| variants[(code / base.pow(i)) % base])
                .collect();
            let full = promoted_for_shape(&shape);
            let shrunk = method_keys(&promoted_for_shape(&shape[..shape.len() - 1]));
            for signature in &method_keys(&full) {
                assert!(
                    shrunk.contains(signature),
                    "'{signature}' lost after removing the last subtype of {shape:?}"
                );
            }
            if full.iter().any(|m| m.to_string().starts_with("get_value(): NodeNumber")) {
                widened += 1;
            }
            checked += 1;
        }
    }
    assert_eq!(checked, 9usize.pow(3) + 9usize.pow(4));
    assert!(widened > 0);
}
