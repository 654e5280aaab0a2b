//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NodeId, TokenEnumId, TokenEnumType, TypeDescriptor, TypeGraph, UnionId, UnionType};

impl TypeGraph {
    pub(super) fn ensure_node(&self, id: NodeId) -> &TypeDescriptor {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("TypeGraph: {id} not found (ids must come from this graph)"))
    }

    pub(super) fn ensure_node_mut(&mut self, id: NodeId) -> &mut TypeDescriptor {
        self.nodes
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("TypeGraph: {id} not found (ids must come from this graph)"))
    }

    pub(super) fn ensure_union(&self, id: UnionId) -> &UnionType {
        self.unions
            .get(id.index())
            .unwrap_or_else(|| panic!("TypeGraph: {id} not found (ids must come from this graph)"))
    }

    pub(super) fn ensure_union_mut(&mut self, id: UnionId) -> &mut UnionType {
        self.unions
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("TypeGraph: {id} not found (ids must come from this graph)"))
    }

    pub(super) fn ensure_token_enum(&self, id: TokenEnumId) -> &TokenEnumType {
        self.token_enums
            .get(id.index())
            .unwrap_or_else(|| panic!("TypeGraph: {id} not found (ids must come from this graph)"))
    }

    pub(super) fn ensure_token_enum_mut(&mut self, id: TokenEnumId) -> &mut TokenEnumType {
        self.token_enums
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("TypeGraph: {id} not found (ids must come from this graph)"))
    }
}
