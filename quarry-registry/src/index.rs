//! Authoritative registry of live indices
//!
//! [`IndexRegistry`] owns the set of index names and their metadata. It is a
//! plain data structure with no interior locking; the service layer wraps it
//! (together with the alias registry) behind a single lock so cross-registry
//! operations stay atomic.

use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::error::{RegistryError, Result};
use crate::IndexMetadata;

/// Registry of live indices, keyed by name
#[derive(Debug, Default)]
pub struct IndexRegistry {
    indices: HashMap<String, IndexMetadata>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new index with the given settings.
    ///
    /// Fails with [`RegistryError::IndexAlreadyExists`] if an index with this
    /// name is already registered. Collisions with alias names are checked by
    /// the service layer, which can see both namespaces.
    pub fn create(&mut self, name: &str, settings: JsonValue) -> Result<()> {
        if self.indices.contains_key(name) {
            return Err(RegistryError::index_already_exists(name));
        }
        self.indices
            .insert(name.to_string(), IndexMetadata::new(name, settings));
        Ok(())
    }

    /// Remove an index, returning its metadata.
    ///
    /// Fails with [`RegistryError::IndexNotFound`] if no such index exists.
    /// The caller is responsible for purging aliases that pointed at it.
    pub fn delete(&mut self, name: &str) -> Result<IndexMetadata> {
        self.indices
            .remove(name)
            .ok_or_else(|| RegistryError::index_not_found(name))
    }

    /// Whether an index with this name is registered. Never fails.
    pub fn exists(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Look up the metadata for an index
    pub fn get(&self, name: &str) -> Option<&IndexMetadata> {
        self.indices.get(name)
    }

    /// Number of live indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// All index names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indices.keys().cloned().collect();
        names.sort();
        names
    }
}
