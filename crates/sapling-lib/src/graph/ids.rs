//! Arena handles for the type graph.

use std::fmt;

/// Index of a [`TypeDescriptor`](super::TypeDescriptor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Index of a synthesized [`UnionType`](super::UnionType).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnionId(u32);

/// Index of a synthesized [`TokenEnumType`](super::TokenEnumType).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenEnumId(u32);

macro_rules! arena_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(NodeId, "node");
arena_id!(UnionId, "union");
arena_id!(TokenEnumId, "tokens");

/// What a slot accessor returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotType {
    /// An existing node type, nothing synthesized.
    Node(NodeId),
    Tokens(TokenEnumId),
    Union(UnionId),
}

/// A type other types can implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterfaceId {
    Union(UnionId),
    Supertype(NodeId),
}

/// Any type in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Node(NodeId),
    Union(UnionId),
    Tokens(TokenEnumId),
}

impl From<SlotType> for TypeKey {
    fn from(slot: SlotType) -> Self {
        match slot {
            SlotType::Node(id) => Self::Node(id),
            SlotType::Tokens(id) => Self::Tokens(id),
            SlotType::Union(id) => Self::Union(id),
        }
    }
}

impl From<InterfaceId> for TypeKey {
    fn from(interface: InterfaceId) -> Self {
        match interface {
            InterfaceId::Union(id) => Self::Union(id),
            InterfaceId::Supertype(id) => Self::Node(id),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "{id}"),
            Self::Union(id) => write!(f, "{id}"),
            Self::Tokens(id) => write!(f, "{id}"),
        }
    }
}
