//! Index and alias registry for the Quarry search server
//!
//! This crate is the name-resolution core: it tracks which named indices
//! exist, which aliases point at which indices, and resolves any
//! caller-supplied name to the underlying index or indices it denotes. It
//! defines four pieces:
//!
//! - [`IndexRegistry`]: authoritative set of index names and their metadata
//! - [`AliasRegistry`]: alias → index mapping plus the derived reverse view
//! - [`NameResolver`]: classification and resolution of caller-supplied names
//! - [`RegistryService`]: the shared, thread-safe operation surface
//!
//! Indices and aliases share one string namespace: a name is never
//! simultaneously a live index and a live alias. All mutations go through
//! [`RegistryService`], which holds both registries behind a single lock so
//! cross-registry updates (such as the delete cascade) are atomic from the
//! caller's point of view.

mod error;

pub mod alias;
pub mod index;
pub mod resolve;
pub mod service;

pub use alias::{AliasOutcome, AliasRegistry};
pub use error::{RegistryError, Result};
pub use index::IndexRegistry;
pub use resolve::{NameKind, NameResolver};
pub use service::{DeleteReport, IndexInfo, RegistryService};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Maximum length of an index or alias name, in bytes.
pub const MAX_NAME_BYTES: usize = 255;

/// Characters that may not appear in index or alias names.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '*', '?', '"', '<', '>', '|', ',', '#', ' '];

/// Metadata record for a live index
///
/// The settings blob is opaque: it is stored and returned verbatim, never
/// interpreted by the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Index name (unique across indices and aliases)
    pub name: String,

    /// When the index was created
    pub created_at: DateTime<Utc>,

    /// Opaque settings supplied at creation time
    pub settings: JsonValue,
}

impl IndexMetadata {
    /// Create a new metadata record stamped with the current time
    pub fn new(name: impl Into<String>, settings: JsonValue) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            settings,
        }
    }
}

/// Validate an index or alias name.
///
/// Indices and aliases share one namespace and one rule set: names must be
/// non-empty, at most [`MAX_NAME_BYTES`] bytes, free of path/wildcard
/// characters, not `.` or `..`, and not start with `_` (reserved for API
/// endpoints such as `_alias`).
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RegistryError::invalid_name(name, "name cannot be empty"));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(RegistryError::invalid_name(
            name,
            format!("name cannot exceed {} bytes", MAX_NAME_BYTES),
        ));
    }
    if name == "." || name == ".." {
        return Err(RegistryError::invalid_name(
            name,
            "name cannot be '.' or '..'",
        ));
    }
    if name.starts_with('_') {
        return Err(RegistryError::invalid_name(
            name,
            "names starting with '_' are reserved",
        ));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control())
    {
        return Err(RegistryError::invalid_name(
            name,
            format!("name cannot contain {:?}", ch),
        ));
    }
    Ok(())
}
