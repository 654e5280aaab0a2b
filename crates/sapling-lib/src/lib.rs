//! Sapling: typed wrapper model derivation for tree-sitter grammars.
//!
//! Reads a grammar's `node-types.json` and derives the shape of a typed API
//! around its untyped parse tree: one wrapper per node type, unions and
//! token enums synthesized for slots permitting several types, where those
//! are declared, and which accessors can move up to a shared interface.
//!
//! # Example
//!
//! ```
//! use sapling_lib::{Config, DefaultNaming, generate_from_json};
//!
//! let json = r#"[
//!     {"type": "program", "named": true, "root": true,
//!      "children": {"multiple": true, "required": false, "types": [
//!         {"type": "number", "named": true},
//!         {"type": ";", "named": false}]}},
//!     {"type": "number", "named": true},
//!     {"type": ";", "named": false}
//! ]"#;
//!
//! let model = generate_from_json(json, &Config::new(), &DefaultNaming::new()).unwrap();
//! print!("{}", sapling_lib::dump(&model));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod accessors;
pub mod config;
pub mod dump;
pub mod error;
pub mod generate;
pub mod graph;
pub mod hoist;
pub mod naming;
pub mod promote;
pub mod slot;
pub mod supertypes;
pub mod topo;

#[cfg(test)]
mod generate_tests;

pub use config::{Config, CustomMethod, OptionalStyle};
pub use dump::{ModelPrinter, dump};
pub use error::{Error, Result};
pub use generate::{Model, generate, generate_from_json};
pub use hoist::HoistPolicy;
pub use naming::{DefaultNaming, NamingPolicy, TokenNames};
