use std::path::PathBuf;

use indoc::indoc;
use sapling_lib::{Config, HoistPolicy, OptionalStyle};

use super::model::{ModelArgs, derive_model, load_model};

const NODE_TYPES: &str = indoc! {r#"
    [
      {
        "type": "program",
        "named": true,
        "children": {
          "multiple": true,
          "required": false,
          "types": [{"type": "expr", "named": true}]
        }
      },
      {"type": "number", "named": true}
    ]
"#};

fn args(path: &str) -> ModelArgs {
    ModelArgs {
        node_types: PathBuf::from(path),
        root: None,
        aliases: vec![],
        hoist: HoistPolicy::AsNeeded,
        optional: OptionalStyle::Wrapper,
        custom_methods: None,
    }
}

#[test]
fn unknown_reference_is_reported() {
    let err = derive_model(NODE_TYPES, &Config::new()).unwrap_err();
    insta::assert_snapshot!(err, @"unknown node type 'expr' referenced by 'program'");
}

#[test]
fn aliases_and_root_reach_the_config() {
    let mut args = args("node-types.json");
    args.root = Some("program".to_string());
    args.aliases = vec![("expr".to_string(), "number".to_string())];

    let model = derive_model(NODE_TYPES, &args.config()).unwrap();
    let root = model.root().unwrap();
    assert_eq!(model.graph().node(root).name, "program");
}

#[test]
fn malformed_json_is_reported() {
    let err = derive_model("{", &Config::new()).unwrap_err();
    assert!(err.starts_with("invalid node-types.json: "), "{err}");
}

#[test]
fn missing_file_is_reported() {
    let err = load_model(&args("does/not/exist.json")).err().unwrap();
    assert!(
        err.starts_with("failed to read 'does/not/exist.json': "),
        "{err}"
    );
}
