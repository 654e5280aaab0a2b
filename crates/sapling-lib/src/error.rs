//! Errors raised while deriving the wrapper model.
//!
//! All of them are fatal for the current run: either the schema has a shape
//! the derivation cannot express, or a caller broke a phase-ordering rule.

/// Errors that abort model derivation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid node-types.json: {0}")]
    Schema(String),

    #[error("duplicate node type name '{0}'")]
    DuplicateType(String),

    #[error("unknown node type '{name}' referenced by '{referrer}'")]
    UnknownType { name: String, referrer: String },

    #[error(
        "alias '{name}' -> '{target}' (referenced by '{referrer}') points to another alias; aliases are single-hop"
    )]
    AliasCycle {
        name: String,
        target: String,
        referrer: String,
    },

    #[error("non-named node type '{0}' must not declare children, fields or subtypes")]
    NonNamedWithStructure(String),

    #[error("non-named node type '{0}' must not be the root")]
    NonNamedRoot(String),

    #[error("supertype '{name}' must have at least 2 named subtypes, found {found}")]
    SupertypeTooFewSubtypes { name: String, found: usize },

    #[error("supertype '{0}' must not declare children or fields")]
    SupertypeHasStructure(String),

    #[error("duplicate token '{token}' in a slot of '{enclosing}'")]
    DuplicateToken { token: String, enclosing: String },

    #[error("no token name mapped for '{token}' (type '{parent}', field '{field}')")]
    UnmappedToken {
        parent: String,
        field: String,
        token: String,
    },

    #[error("conflicting root types '{first}' and '{second}'")]
    ConflictingRoot { first: String, second: String },

    #[error("identifier '{ident}' is generated for both {first} and {second}")]
    DuplicateIdentifier {
        ident: String,
        first: String,
        second: String,
    },

    #[error("node type '{0}' is not populated yet")]
    NotYetPopulated(String),

    #[error("node type '{0}' is already populated")]
    AlreadyPopulated(String),

    #[error("'{referrer}' references unknown element '{element}'")]
    UnknownReference { referrer: String, element: String },

    #[error("duplicate method '{method}' on '{owner}'")]
    DuplicateMethod { method: String, owner: String },
}

pub type Result<T> = std::result::Result<T, Error>;
