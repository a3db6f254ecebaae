// metadata.rs — Metadata: descriptive key/value data attached to a node.
//
// Metadata is an insertion-ordered map of string keys to values. Values are
// usually text, but backends may store typed timestamps; the exported view
// (`as_map`) always flattens everything to strings.
//
// Lazy loading is tracked explicitly through `FetchState`: a backend that
// only fetched a node's header records `HeaderOnly`, and later merges the
// detail fields in and records `FullyDetailed`.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known metadata keys most backends can fill.
pub mod keys {
    pub const NAME: &str = "name";
    pub const PARENT_FOLDER: &str = "parent_folder";
    pub const CREATED: &str = "created";
    pub const LAST_CHANGED: &str = "last_changed";
    pub const LAST_AUTHOR: &str = "last_author";
    pub const VERSION: &str = "version";
}

/// How much of a node's metadata has been fetched from its backend.
///
/// The variants are ordered: `NotFetched < HeaderOnly < FullyDetailed`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FetchState {
    /// Nothing has been fetched yet.
    #[default]
    NotFetched,

    /// Only header fields (name and similar) are present.
    HeaderOnly,

    /// All detail fields have been fetched.
    FullyDetailed,
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchState::NotFetched => write!(f, "not_fetched"),
            FetchState::HeaderOnly => write!(f, "header_only"),
            FetchState::FullyDetailed => write!(f, "fully_detailed"),
        }
    }
}

/// A single metadata value.
///
/// Serialized as `{"type": "text", "value": "..."}` so typed values
/// round-trip without being mistaken for text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl MetadataValue {
    /// The value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Timestamp(_) => None,
        }
    }

    /// The value as a timestamp, if it is a timestamp value.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            MetadataValue::Timestamp(ts) => Some(*ts),
            MetadataValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(text) => f.write_str(text),
            MetadataValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for MetadataValue {
    fn from(value: DateTime<Utc>) -> Self {
        MetadataValue::Timestamp(value)
    }
}

/// Descriptive key/value data about a node.
///
/// Owned exclusively by its node. There is no internal locking; mutation
/// goes through `&mut self`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    entries: IndexMap<String, MetadataValue>,

    #[serde(default)]
    fetch_state: FetchState,
}

impl Metadata {
    /// Create empty metadata in the `NotFetched` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(key)
    }

    /// Get a text value. Returns `None` for missing keys and typed values.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetadataValue::as_text)
    }

    /// Get a timestamp value. Returns `None` for missing keys and text values.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(MetadataValue::as_timestamp)
    }

    /// Set a value, returning the previous one.
    ///
    /// Overwriting an existing key keeps its original position.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten to an ordered string-to-string map.
    ///
    /// Each call builds a fresh snapshot; later mutations are not reflected
    /// in maps returned earlier.
    pub fn as_map(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    /// Record that a fetch reached `state`. Never downgrades.
    pub fn record_fetch(&mut self, state: FetchState) {
        if state > self.fetch_state {
            self.fetch_state = state;
        }
    }

    /// Mark the metadata stale. Entries are kept until the next fetch
    /// overwrites them.
    pub fn invalidate(&mut self) {
        self.fetch_state = FetchState::NotFetched;
    }

    /// Merge freshly fetched metadata into this one.
    ///
    /// Entries from `other` overwrite or extend ours, and `other`'s fetch
    /// state is recorded.
    pub fn merge(&mut self, other: Metadata) {
        let Metadata {
            entries,
            fetch_state,
        } = other;
        self.entries.extend(entries);
        self.record_fetch(fetch_state);
    }

    // Typed accessors for the well-known keys.

    pub fn name(&self) -> Option<&str> {
        self.text(keys::NAME)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set(keys::NAME, name.into());
    }

    pub fn parent_folder(&self) -> Option<&str> {
        self.text(keys::PARENT_FOLDER)
    }

    pub fn set_parent_folder(&mut self, parent: impl Into<String>) {
        self.set(keys::PARENT_FOLDER, parent.into());
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.timestamp(keys::CREATED)
    }

    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.set(keys::CREATED, created);
    }

    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        self.timestamp(keys::LAST_CHANGED)
    }

    pub fn set_last_changed(&mut self, changed: DateTime<Utc>) {
        self.set(keys::LAST_CHANGED, changed);
    }

    pub fn last_author(&self) -> Option<&str> {
        self.text(keys::LAST_AUTHOR)
    }

    pub fn set_last_author(&mut self, author: impl Into<String>) {
        self.set(keys::LAST_AUTHOR, author.into());
    }

    pub fn version(&self) -> Option<&str> {
        self.text(keys::VERSION)
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.set(keys::VERSION, version.into());
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}
