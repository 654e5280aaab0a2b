//! Name resolution for schema references.

use indexmap::IndexMap;

use super::NodeId;
use crate::{Error, Result};

/// Declared node types by schema name, plus configured aliases.
///
/// Aliases are consulted only when a name is not declared, and resolve a
/// single hop: an alias whose target is another alias is an error rather
/// than a chain to follow.
#[derive(Clone, Debug, Default)]
pub struct TypeIndex {
    ids: IndexMap<String, NodeId>,
    aliases: IndexMap<String, String>,
}

impl TypeIndex {
    pub fn new(aliases: IndexMap<String, String>) -> Self {
        Self {
            ids: IndexMap::new(),
            aliases,
        }
    }

    pub(crate) fn insert(&mut self, name: &str, id: NodeId) -> Result<()> {
        if self.ids.contains_key(name) {
            return Err(Error::DuplicateType(name.to_string()));
        }
        self.ids.insert(name.to_string(), id);
        Ok(())
    }

    /// Declared type named exactly `name`, aliases not considered.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolves a reference from `referrer` to `name`.
    pub fn resolve(&self, name: &str, referrer: &str) -> Result<NodeId> {
        if let Some(id) = self.get(name) {
            return Ok(id);
        }
        let Some(target) = self.aliases.get(name) else {
            return Err(Error::UnknownType {
                name: name.to_string(),
                referrer: referrer.to_string(),
            });
        };
        if let Some(id) = self.get(target) {
            tracing::trace!(name, target = %target, referrer, "resolved through alias");
            return Ok(id);
        }
        if self.aliases.contains_key(target) {
            return Err(Error::AliasCycle {
                name: name.to_string(),
                target: target.clone(),
                referrer: referrer.to_string(),
            });
        }
        Err(Error::UnknownType {
            name: target.clone(),
            referrer: referrer.to_string(),
        })
    }
}
