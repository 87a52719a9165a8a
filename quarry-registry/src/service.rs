//! Shared, thread-safe operation surface over both registries
//!
//! [`RegistryService`] is the handle the rest of the system holds. It owns
//! the index and alias registries behind a single lock, so every compound
//! operation (namespace checks, the delete cascade) is atomic from the
//! caller's point of view. Handles are cheap to clone and share one
//! underlying state.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value as JsonValue;

use crate::alias::{AliasOutcome, AliasRegistry};
use crate::error::{RegistryError, Result};
use crate::index::IndexRegistry;
use crate::resolve::{NameKind, NameResolver};
use crate::{validate_name, IndexMetadata};

/// Combined registry state guarded by one lock
#[derive(Debug, Default)]
struct RegistryState {
    indices: IndexRegistry,
    aliases: AliasRegistry,
}

/// An index's metadata together with the aliases pointing at it
#[derive(Clone, Debug, PartialEq)]
pub struct IndexInfo {
    pub metadata: IndexMetadata,
    pub aliases: Vec<String>,
}

/// What a delete removed: every resolved index, plus every alias the
/// cascade dropped
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub indices_removed: Vec<String>,
    pub aliases_removed: Vec<String>,
}

/// Thread-safe handle over the index and alias registries
#[derive(Clone, Default)]
pub struct RegistryService {
    state: Arc<RwLock<RegistryState>>,
}

impl RegistryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new index with the given settings.
    ///
    /// The name must pass [`validate_name`](crate::validate_name) and must
    /// not collide with a live index ([`RegistryError::IndexAlreadyExists`])
    /// or a live alias ([`RegistryError::NameConflict`]).
    pub fn create_index(&self, name: &str, settings: JsonValue) -> Result<()> {
        validate_name(name)?;

        let mut state = self.state.write();
        if state.aliases.exists(name) {
            return Err(RegistryError::name_conflict(name));
        }
        state.indices.create(name, settings)?;
        tracing::info!(index = %name, "registered index");
        Ok(())
    }

    /// Delete whatever `name` resolves to.
    ///
    /// The name may be an index or an alias; every resolved index is removed
    /// and aliases left without targets are dropped in the same critical
    /// section. Fails with [`RegistryError::IndexNotFound`] if the name
    /// resolves to nothing.
    pub fn delete_index(&self, name: &str) -> Result<DeleteReport> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let resolved =
            NameResolver::new(&state.indices, &state.aliases).resolve_to_indices(name);
        if resolved.is_empty() {
            return Err(RegistryError::index_not_found(name));
        }

        let mut report = DeleteReport::default();
        for index in resolved {
            state.indices.delete(&index)?;
            report
                .aliases_removed
                .extend(state.aliases.purge_for_index(&index));
            report.indices_removed.push(index);
        }
        report.aliases_removed.sort();

        tracing::info!(
            selector = %name,
            indices = ?report.indices_removed,
            aliases = ?report.aliases_removed,
            "deleted indices"
        );
        Ok(report)
    }

    /// Whether `name` denotes a live index or a live alias. Never fails.
    pub fn exists(&self, name: &str) -> bool {
        let state = self.state.read();
        NameResolver::new(&state.indices, &state.aliases).exists(name)
    }

    /// Create or replace an alias pointing at `index`.
    ///
    /// Replacing retargets the alias wholesale; see
    /// [`AliasRegistry::put_alias`] for the error cases.
    pub fn put_alias(&self, index: &str, alias: &str) -> Result<AliasOutcome> {
        validate_name(alias)?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        let outcome = state.aliases.put_alias(&state.indices, index, alias)?;
        tracing::info!(index = %index, alias = %alias, outcome = ?outcome, "put alias");
        Ok(outcome)
    }

    /// Whether an alias exists, optionally restricted to one target index.
    /// Never fails.
    pub fn exists_alias(&self, alias: &str, index: Option<&str>) -> bool {
        self.state.read().aliases.exists_alias(alias, index)
    }

    /// Remove an alias from an index.
    ///
    /// Fails with [`RegistryError::IndexNotFound`] if the index is not live,
    /// and with [`RegistryError::AliasNotFound`] if the alias does not point
    /// at that index. The target index itself is untouched.
    pub fn delete_alias(&self, index: &str, alias: &str) -> Result<()> {
        let mut state = self.state.write();
        if !state.indices.exists(index) {
            return Err(RegistryError::index_not_found(index));
        }
        if !state.aliases.exists_alias(alias, Some(index)) {
            return Err(RegistryError::alias_not_found(alias));
        }
        state.aliases.delete_alias(alias)?;
        tracing::info!(index = %index, alias = %alias, "deleted alias");
        Ok(())
    }

    /// Classify a name as index, alias or unknown
    pub fn classify(&self, name: &str) -> NameKind {
        let state = self.state.read();
        NameResolver::new(&state.indices, &state.aliases).classify(name)
    }

    /// Resolve a name to the underlying index names
    pub fn resolve_to_indices(&self, name: &str) -> BTreeSet<String> {
        let state = self.state.read();
        NameResolver::new(&state.indices, &state.aliases).resolve_to_indices(name)
    }

    /// Metadata and aliases for every index `name` resolves to.
    ///
    /// Resolves aliases, so asking for an alias returns its target index.
    /// An unknown name yields an empty vec.
    pub fn get_index(&self, name: &str) -> Vec<IndexInfo> {
        let state = self.state.read();
        let resolved = NameResolver::new(&state.indices, &state.aliases).resolve_to_indices(name);

        let mut infos = Vec::with_capacity(resolved.len());
        for index in resolved {
            if let Some(metadata) = state.indices.get(&index) {
                infos.push(IndexInfo {
                    metadata: metadata.clone(),
                    aliases: state.aliases.aliases_for(&index),
                });
            }
        }
        infos
    }

    /// Aliases pointing at a live index, sorted.
    ///
    /// Fails with [`RegistryError::IndexNotFound`] if `index` is not a live
    /// index name (aliases do not resolve here).
    pub fn index_aliases(&self, index: &str) -> Result<Vec<String>> {
        let state = self.state.read();
        if !state.indices.exists(index) {
            return Err(RegistryError::index_not_found(index));
        }
        Ok(state.aliases.aliases_for(index))
    }

    /// Index names targeted by an alias, sorted. Empty if the alias is
    /// unknown.
    pub fn indices_with_alias(&self, alias: &str) -> Vec<String> {
        let state = self.state.read();
        match state.aliases.targets(alias) {
            Some(targets) => targets.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// All live index names, sorted
    pub fn index_names(&self) -> Vec<String> {
        self.state.read().indices.names()
    }

    /// Number of live indices
    pub fn index_count(&self) -> usize {
        self.state.read().indices.len()
    }

    /// Number of live aliases
    pub fn alias_count(&self) -> usize {
        self.state.read().aliases.len()
    }
}

impl fmt::Debug for RegistryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("RegistryService")
            .field("index_count", &state.indices.len())
            .field("alias_count", &state.aliases.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service_with(indices: &[&str]) -> RegistryService {
        let service = RegistryService::new();
        for name in indices {
            service.create_index(name, json!({})).unwrap();
        }
        service
    }

    #[test]
    fn test_exists_false_for_unknown_names() {
        let service = RegistryService::new();
        assert!(!service.exists("anything"));
        assert!(!service.exists_alias("anything", None));
    }

    #[test]
    fn test_create_then_exists_then_duplicate() {
        let service = service_with(&["logs"]);
        assert!(service.exists("logs"));

        let err = service.create_index("logs", json!({})).unwrap_err();
        assert_eq!(err, RegistryError::index_already_exists("logs"));
    }

    #[test]
    fn test_delete_plain_index() {
        let service = service_with(&["logs"]);

        let report = service.delete_index("logs").unwrap();
        assert_eq!(report.indices_removed, vec!["logs"]);
        assert!(report.aliases_removed.is_empty());
        assert!(!service.exists("logs"));
    }

    #[test]
    fn test_delete_unknown_name_fails() {
        let service = RegistryService::new();
        let err = service.delete_index("ghost").unwrap_err();
        assert_eq!(err, RegistryError::index_not_found("ghost"));
    }

    #[test]
    fn test_alias_existence_probes() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        assert!(service.exists("alias"));
        assert!(service.exists_alias("alias", None));
        assert!(service.exists_alias("alias", Some("foo")));
        assert!(!service.exists_alias("alias", Some("bar")));
    }

    #[test]
    fn test_delete_by_alias_cascades() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        let report = service.delete_index("alias").unwrap();
        assert_eq!(report.indices_removed, vec!["foo"]);
        assert_eq!(report.aliases_removed, vec!["alias"]);

        assert!(!service.exists("alias"));
        assert!(!service.exists_alias("alias", None));
        assert!(!service.exists("foo"));
    }

    #[test]
    fn test_delete_by_index_drops_its_aliases() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "a1").unwrap();
        service.put_alias("foo", "a2").unwrap();

        let report = service.delete_index("foo").unwrap();
        assert_eq!(report.aliases_removed, vec!["a1", "a2"]);
        assert!(!service.exists_alias("a1", None));
        assert!(!service.exists_alias("a2", None));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        for _ in 0..3 {
            assert!(service.exists("foo"));
            assert!(service.exists_alias("alias", Some("foo")));
            assert!(!service.exists("ghost"));
        }
    }

    #[test]
    fn test_namespace_disjointness() {
        let service = service_with(&["foo", "foo2"]);

        // an alias may not shadow a live index
        let err = service.put_alias("foo", "foo2").unwrap_err();
        assert_eq!(err, RegistryError::name_conflict("foo2"));

        // an index may not shadow a live alias
        service.put_alias("foo", "alias").unwrap();
        let err = service.create_index("alias", json!({})).unwrap_err();
        assert_eq!(err, RegistryError::name_conflict("alias"));
    }

    #[test]
    fn test_put_alias_replaces_target() {
        let service = service_with(&["old", "new"]);

        assert_eq!(
            service.put_alias("old", "alias").unwrap(),
            AliasOutcome::Created
        );
        assert_eq!(
            service.put_alias("new", "alias").unwrap(),
            AliasOutcome::Replaced
        );

        assert!(service.exists_alias("alias", Some("new")));
        assert!(!service.exists_alias("alias", Some("old")));
        assert_eq!(
            service.resolve_to_indices("alias"),
            BTreeSet::from(["new".to_string()])
        );
    }

    #[test]
    fn test_delete_alias_keeps_index() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        service.delete_alias("foo", "alias").unwrap();
        assert!(!service.exists_alias("alias", None));
        assert!(service.exists("foo"));
    }

    #[test]
    fn test_delete_alias_errors() {
        let service = service_with(&["foo", "bar"]);
        service.put_alias("foo", "alias").unwrap();

        let err = service.delete_alias("ghost", "alias").unwrap_err();
        assert_eq!(err, RegistryError::index_not_found("ghost"));

        // live alias, but not on that index
        let err = service.delete_alias("bar", "alias").unwrap_err();
        assert_eq!(err, RegistryError::alias_not_found("alias"));
        assert!(service.exists_alias("alias", Some("foo")));
    }

    #[test]
    fn test_classify_and_resolve() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        assert_eq!(service.classify("foo"), NameKind::Index);
        assert_eq!(service.classify("alias"), NameKind::Alias);
        assert_eq!(service.classify("ghost"), NameKind::Unknown);
        assert_eq!(
            service.resolve_to_indices("alias"),
            BTreeSet::from(["foo".to_string()])
        );
        assert!(service.resolve_to_indices("ghost").is_empty());
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let service = service_with(&["foo"]);

        assert!(matches!(
            service.create_index("_internal", json!({})),
            Err(RegistryError::InvalidName { .. })
        ));
        assert!(matches!(
            service.create_index("bad name", json!({})),
            Err(RegistryError::InvalidName { .. })
        ));
        assert!(matches!(
            service.put_alias("foo", "bad/alias"),
            Err(RegistryError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_invalid_names_read_as_absent() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        // the read surface never errors on invalid names, it reports absence
        assert!(!service.exists("_internal"));
        assert!(!service.exists(""));
        assert!(!service.exists_alias("_internal", None));
        assert!(!service.exists_alias("alias", Some("")));
        assert_eq!(service.classify("_internal"), NameKind::Unknown);
        assert!(service.resolve_to_indices("_internal").is_empty());
        assert!(service.get_index("_internal").is_empty());

        // deletes of invalid names miss: such names can never be live
        assert_eq!(
            service.delete_index("_internal").unwrap_err(),
            RegistryError::index_not_found("_internal")
        );
        assert_eq!(
            service.delete_alias("foo", "_internal").unwrap_err(),
            RegistryError::alias_not_found("_internal")
        );
    }

    #[test]
    fn test_get_index_resolves_aliases() {
        let service = service_with(&["foo"]);
        service
            .create_index("bar", json!({"number_of_replicas": 0}))
            .unwrap();
        service.put_alias("bar", "alias").unwrap();

        let infos = service.get_index("alias");
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].metadata.name, "bar");
        assert_eq!(infos[0].metadata.settings["number_of_replicas"], 0);
        assert_eq!(infos[0].aliases, vec!["alias"]);

        assert!(service.get_index("ghost").is_empty());
    }

    #[test]
    fn test_index_aliases_listing() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "b").unwrap();
        service.put_alias("foo", "a").unwrap();

        assert_eq!(service.index_aliases("foo").unwrap(), vec!["a", "b"]);
        assert_eq!(
            service.index_aliases("ghost").unwrap_err(),
            RegistryError::index_not_found("ghost")
        );
    }

    #[test]
    fn test_indices_with_alias() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        assert_eq!(service.indices_with_alias("alias"), vec!["foo"]);
        assert!(service.indices_with_alias("ghost").is_empty());
    }

    #[test]
    fn test_counts_and_names() {
        let service = service_with(&["b", "a"]);
        service.put_alias("a", "alias").unwrap();

        assert_eq!(service.index_count(), 2);
        assert_eq!(service.alias_count(), 1);
        assert_eq!(service.index_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_debug_shows_counts() {
        let service = service_with(&["a"]);
        let rendered = format!("{:?}", service);
        assert!(rendered.contains("index_count"));
        assert!(rendered.contains("1"));
    }

    #[test]
    fn test_mutations_emit_info_events() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct InfoCounter(Arc<AtomicUsize>);

        impl tracing::Subscriber for InfoCounter {
            fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
                true
            }
            fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
                tracing::span::Id::from_u64(1)
            }
            fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}
            fn record_follows_from(
                &self,
                _span: &tracing::span::Id,
                _follows: &tracing::span::Id,
            ) {
            }
            fn event(&self, event: &tracing::Event<'_>) {
                if *event.metadata().level() == tracing::Level::INFO {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
            fn enter(&self, _span: &tracing::span::Id) {}
            fn exit(&self, _span: &tracing::span::Id) {}
        }

        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = InfoCounter(count.clone());

        tracing::subscriber::with_default(subscriber, || {
            let service = RegistryService::new();
            service.create_index("logs", json!({})).unwrap();
            service.put_alias("logs", "current").unwrap();
            service.delete_alias("logs", "current").unwrap();
            service.delete_index("logs").unwrap();
        });

        // one info event per mutation
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_concurrent_creates_are_serialized() {
        let service = RegistryService::new();
        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(std::thread::spawn(move || {
                service
                    .create_index(&format!("idx-{}", i), json!({}))
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(service.index_count(), 8);
    }

    #[test]
    fn test_concurrent_delete_and_probe() {
        let service = service_with(&["foo"]);
        service.put_alias("foo", "alias").unwrap();

        let prober = {
            let service = service.clone();
            std::thread::spawn(move || {
                // each resolution sees the registry before or after the
                // cascade, never a dangling alias
                for _ in 0..100 {
                    let resolved = service.resolve_to_indices("alias");
                    assert!(
                        resolved.is_empty() || resolved == BTreeSet::from(["foo".to_string()])
                    );
                }
            })
        };

        service.delete_index("alias").unwrap();
        prober.join().unwrap();

        assert!(!service.exists("foo"));
        assert!(!service.exists_alias("alias", None));
    }
}
