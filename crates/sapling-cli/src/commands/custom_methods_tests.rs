use std::path::Path;

use indoc::indoc;
use sapling_lib::promote::TypeRef;
use sapling_lib::{Config, DefaultNaming, generate_from_json};

use super::custom_methods::{CustomMethodsConfig, parse_type};

const NODE_TYPES: &str = indoc! {r#"
    [
      {"type": "assignment", "named": true},
      {"type": "call", "named": true},
      {
        "type": "_statement",
        "named": true,
        "subtypes": [{"type": "assignment", "named": true}, {"type": "call", "named": true}]
      }
    ]
"#};

fn render(text: &str) -> String {
    parse_type(text).unwrap().to_string()
}

#[test]
fn type_syntax() {
    assert_eq!(parse_type("String").unwrap(), TypeRef::named("String"));
    assert_eq!(
        parse_type("Map<String, List<NodeCall>>").unwrap(),
        TypeRef::container(
            "Map",
            vec![
                TypeRef::named("String"),
                TypeRef::container("List", vec![TypeRef::named("NodeCall")]),
            ],
        )
    );
    assert_eq!(parse_type("int[]").unwrap(), TypeRef::opaque("int[]"));
    assert_eq!(render("@Nullable  List<A>"), "@Nullable List<A>");
}

#[test]
fn malformed_types_are_rejected() {
    for text in ["", "List<A", "List<A>>", "List<>", "@Nullable", "Li st<A>"] {
        assert!(parse_type(text).is_err(), "'{text}' should be rejected");
    }
}

#[test]
fn missing_file_is_reported() {
    let err = CustomMethodsConfig::read(Path::new("does/not/methods.json")).unwrap_err();
    assert!(
        err.starts_with("failed to read 'does/not/methods.json': "),
        "{err}"
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = CustomMethodsConfig::parse(r#"{"node-types": {}, "typed-tree": []}"#).unwrap_err();
    assert!(err.starts_with("invalid custom methods: "), "{err}");
}

#[test]
fn methods_reach_the_model_and_promote() {
    let json = indoc! {r#"
        {
          "node-types": {
            "assignment": [
              {"name": "accept", "type-variables": ["R"], "parameters": ["Visitor<R>"], "return-type": "R"}
            ],
            "call": [
              {"name": "accept", "type-variables": ["R"], "parameters": ["Visitor<R>"], "return-type": "R"},
              {"name": "callee", "return-type": "@Nullable String"}
            ]
          }
        }
    "#};
    let config = CustomMethodsConfig::parse(json)
        .unwrap()
        .apply(Config::new())
        .unwrap();
    let model = generate_from_json(NODE_TYPES, &config, &DefaultNaming::new()).unwrap();
    let graph = model.graph();

    let call = graph.lookup("call", "test").unwrap();
    let own: Vec<String> = model.own_methods(call).iter().map(|m| m.to_string()).collect();
    insta::assert_snapshot!(own.join("\n"), @r"
    <R> accept(Visitor<R>): R [custom]
    callee(): @Nullable String [custom]
    ");

    let statement = graph.lookup("_statement", "test").unwrap();
    let promoted: Vec<String> = model
        .promoted(sapling_lib::graph::InterfaceId::Supertype(statement))
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(promoted, ["<R> accept(Visitor<R>): R [custom]"]);
}
