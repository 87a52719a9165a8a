//! Classification and resolution of caller-supplied names

use std::collections::BTreeSet;

use crate::alias::AliasRegistry;
use crate::index::IndexRegistry;

/// What a caller-supplied name denotes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Index,
    Alias,
    Unknown,
}

/// Resolves names against both registries.
///
/// A resolver borrows the registries, so the service builds one per
/// operation inside its lock and drops it before the lock is released.
#[derive(Clone, Copy, Debug)]
pub struct NameResolver<'a> {
    indices: &'a IndexRegistry,
    aliases: &'a AliasRegistry,
}

impl<'a> NameResolver<'a> {
    pub fn new(indices: &'a IndexRegistry, aliases: &'a AliasRegistry) -> Self {
        Self { indices, aliases }
    }

    /// Classify a name as an index, an alias, or unknown.
    ///
    /// The two namespaces are disjoint, so at most one arm can match.
    pub fn classify(&self, name: &str) -> NameKind {
        if self.indices.exists(name) {
            NameKind::Index
        } else if self.aliases.exists(name) {
            NameKind::Alias
        } else {
            NameKind::Unknown
        }
    }

    /// Resolve a name to the set of underlying index names.
    ///
    /// An index resolves to itself, an alias to its target set, and an
    /// unknown name to the empty set.
    pub fn resolve_to_indices(&self, name: &str) -> BTreeSet<String> {
        match self.classify(name) {
            NameKind::Index => BTreeSet::from([name.to_string()]),
            NameKind::Alias => self.aliases.targets(name).cloned().unwrap_or_default(),
            NameKind::Unknown => BTreeSet::new(),
        }
    }

    /// Whether the name denotes anything live
    pub fn exists(&self, name: &str) -> bool {
        self.classify(name) != NameKind::Unknown
    }
}
