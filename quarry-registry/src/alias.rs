//! Alias registry: alias → index mapping with a derived reverse view
//!
//! [`AliasRegistry`] keeps two maps that are always exact transposes of each
//! other: the forward map from alias name to target index names, and the
//! reverse map from index name to the aliases pointing at it. Both maps are
//! private and only mutated together, through [`AliasRegistry::put_alias`],
//! [`AliasRegistry::delete_alias`] and [`AliasRegistry::purge_for_index`].
//!
//! Target sets are kept as sets so an alias could span several indices, but
//! the public upsert installs a single target and replaces any previous set,
//! matching the single-target aliasing the rest of the system exposes.

use std::collections::{BTreeSet, HashMap};

use crate::error::{RegistryError, Result};
use crate::index::IndexRegistry;

/// Outcome of a successful alias upsert
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasOutcome {
    /// The alias did not exist before
    Created,
    /// The alias existed and its target set was replaced
    Replaced,
}

/// Registry of aliases and the indices they target
#[derive(Debug, Default)]
pub struct AliasRegistry {
    /// alias name → index names it targets (never empty)
    forward: HashMap<String, BTreeSet<String>>,
    /// index name → alias names pointing at it (exact transpose of `forward`)
    reverse: HashMap<String, BTreeSet<String>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace an alias targeting a single index.
    ///
    /// The target index must be live, and the alias name must not collide
    /// with an index name (the two namespaces are disjoint). Re-putting an
    /// existing alias replaces its whole target set rather than appending.
    pub fn put_alias(
        &mut self,
        indices: &IndexRegistry,
        index: &str,
        alias: &str,
    ) -> Result<AliasOutcome> {
        if !indices.exists(index) {
            return Err(RegistryError::index_not_found(index));
        }
        if indices.exists(alias) {
            return Err(RegistryError::name_conflict(alias));
        }

        let targets = BTreeSet::from([index.to_string()]);
        let previous = self.forward.insert(alias.to_string(), targets);

        let outcome = match previous {
            Some(old_targets) => {
                for old in &old_targets {
                    self.unlink_reverse(old, alias);
                }
                AliasOutcome::Replaced
            }
            None => AliasOutcome::Created,
        };
        self.reverse
            .entry(index.to_string())
            .or_default()
            .insert(alias.to_string());

        Ok(outcome)
    }

    /// Remove an alias without touching its target indices.
    ///
    /// Fails with [`RegistryError::AliasNotFound`] if no such alias exists.
    pub fn delete_alias(&mut self, alias: &str) -> Result<()> {
        let targets = self
            .forward
            .remove(alias)
            .ok_or_else(|| RegistryError::alias_not_found(alias))?;
        for index in &targets {
            self.unlink_reverse(index, alias);
        }
        Ok(())
    }

    /// Drop a deleted index from every alias that targets it.
    ///
    /// Aliases whose target set becomes empty are removed entirely; their
    /// names are returned, sorted. Called by the service as part of index
    /// deletion, under the same lock as the index removal.
    pub fn purge_for_index(&mut self, index: &str) -> Vec<String> {
        let Some(aliases) = self.reverse.remove(index) else {
            return Vec::new();
        };

        let mut dropped = Vec::new();
        for alias in aliases {
            if let Some(targets) = self.forward.get_mut(&alias) {
                targets.remove(index);
                if targets.is_empty() {
                    self.forward.remove(&alias);
                    dropped.push(alias);
                }
            }
        }
        dropped
    }

    /// Whether an alias with this name is registered. Never fails.
    pub fn exists(&self, alias: &str) -> bool {
        // target sets are never empty, so presence in the forward map is
        // equivalent to "has at least one live target"
        self.forward.contains_key(alias)
    }

    /// Whether an alias exists, optionally filtered to one target index.
    ///
    /// With no filter this is plain existence; with a filter it is true only
    /// when the alias's target set contains that index. Unknown names yield
    /// `false` in either form.
    pub fn exists_alias(&self, alias: &str, index: Option<&str>) -> bool {
        match (self.forward.get(alias), index) {
            (Some(targets), Some(index)) => targets.contains(index),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// The target index names of an alias
    pub fn targets(&self, alias: &str) -> Option<&BTreeSet<String>> {
        self.forward.get(alias)
    }

    /// All aliases pointing at an index, sorted. Empty if the index has none.
    pub fn aliases_for(&self, index: &str) -> Vec<String> {
        match self.reverse.get(index) {
            Some(aliases) => aliases.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Number of live aliases
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn unlink_reverse(&mut self, index: &str, alias: &str) {
        if let Some(aliases) = self.reverse.get_mut(index) {
            aliases.remove(alias);
            if aliases.is_empty() {
                self.reverse.remove(index);
            }
        }
    }
}
