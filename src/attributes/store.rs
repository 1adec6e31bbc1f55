//! Namespaced attribute storage.
//!
//! An `AttributeStore` holds typed values under `namespace:key` names so that
//! unrelated descriptors can share an attribute name without colliding.
//! Stores live inside item metadata (the per-item attribute blob) and inside
//! descriptors (their settings).
//!
//! ## Example
//!
//! ```
//! use voxel_items::attributes::AttributeStore;
//!
//! let mut store = AttributeStore::new();
//! store.set("attribute", "max-level", 5i32);
//!
//! assert_eq!(store.get("attribute", "max-level", 1i32), 5);
//! // Wrong kind or missing key: the default comes back.
//! assert_eq!(store.get("attribute", "max-level", 1i64), 1);
//! assert_eq!(store.get("other", "max-level", 1i32), 1);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::value::{AttributeKind, AttributeValue};
use crate::core::Result;

/// Fully qualified attribute name (`namespace:key`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Qualify `key` with `namespace`.
    pub fn new(namespace: &str, key: &str) -> Self {
        Self(format!("{namespace}:{key}"))
    }

    /// The namespace part (everything before the first `:`).
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or("", |(ns, _)| ns)
    }

    /// The key part (everything after the first `:`).
    #[must_use]
    pub fn key(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, k)| k)
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed, namespace-qualified key/value storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeStore {
    values: FxHashMap<AttributeKey, AttributeValue>,
}

impl AttributeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a typed value.
    ///
    /// Never fails: a missing key or a value of another kind both yield
    /// `default`.
    #[must_use]
    pub fn get<T: AttributeKind>(&self, namespace: &str, key: &str, default: T) -> T {
        self.get_opt(namespace, key).unwrap_or(default)
    }

    /// Read a typed value, `None` when missing or of another kind.
    #[must_use]
    pub fn get_opt<T: AttributeKind>(&self, namespace: &str, key: &str) -> Option<T> {
        let value = self.values.get(&AttributeKey::new(namespace, key))?;
        let typed = T::from_value(value);
        if typed.is_none() {
            trace!(namespace, key, stored = value.kind_name(), "attribute read with another kind");
        }
        typed
    }

    /// Raw stored value, whatever its kind.
    #[must_use]
    pub fn get_raw(&self, namespace: &str, key: &str) -> Option<&AttributeValue> {
        self.values.get(&AttributeKey::new(namespace, key))
    }

    /// Store a value, replacing whatever was there (of any kind).
    pub fn set(&mut self, namespace: &str, key: &str, value: impl Into<AttributeValue>) {
        self.values
            .insert(AttributeKey::new(namespace, key), value.into());
    }

    /// Is anything stored under this name?
    #[must_use]
    pub fn has(&self, namespace: &str, key: &str) -> bool {
        self.values.contains_key(&AttributeKey::new(namespace, key))
    }

    /// Remove a value. Removing a missing key is a no-op.
    pub fn remove(&mut self, namespace: &str, key: &str) -> Option<AttributeValue> {
        self.values.remove(&AttributeKey::new(namespace, key))
    }

    /// Remove every value in `namespace`.
    pub fn remove_namespace(&mut self, namespace: &str) {
        self.values.retain(|k, _| k.namespace() != namespace);
    }

    /// Iterate over `(key, value)` pairs within `namespace`.
    pub fn iter_namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a AttributeValue)> + 'a {
        self.values
            .iter()
            .filter(move |(k, _)| k.namespace() == namespace)
            .map(|(k, v)| (k.key(), v))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Is the store empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode as an opaque binary blob.
    pub fn to_blob(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a blob produced by [`AttributeStore::to_blob`].
    pub fn from_blob(blob: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_key_parts() {
        let key = AttributeKey::new("voxelenchant", "pack/vein_mining");
        assert_eq!(key.0, "voxelenchant:pack/vein_mining");
        assert_eq!(key.namespace(), "voxelenchant");
        assert_eq!(key.key(), "pack/vein_mining");
    }

    #[test]
    fn test_set_get_has_remove() {
        let mut store = AttributeStore::new();
        assert!(!store.has("pack", "speed"));

        store.set("pack", "speed", 1.25f64);
        assert!(store.has("pack", "speed"));
        assert_eq!(store.get("pack", "speed", 0.0f64), 1.25);

        assert!(store.remove("pack", "speed").is_some());
        assert!(!store.has("pack", "speed"));
        assert_eq!(store.get("pack", "speed", 0.5f64), 0.5);
        assert!(store.remove("pack", "speed").is_none());
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let mut store = AttributeStore::new();
        store.set("first", "level", 1i32);
        store.set("second", "level", 2i32);

        assert_eq!(store.get("first", "level", 0i32), 1);
        assert_eq!(store.get("second", "level", 0i32), 2);
    }

    #[test]
    fn test_type_mismatch_returns_default() {
        let mut store = AttributeStore::new();
        store.set("pack", "name", "ruby");

        assert_eq!(store.get("pack", "name", 7i32), 7);
        assert!(!store.get("pack", "name", false));
        assert_eq!(store.get("pack", "name", String::new()), "ruby");
    }

    #[test]
    fn test_overwrite_changes_kind() {
        let mut store = AttributeStore::new();
        store.set("pack", "value", 3i32);
        store.set("pack", "value", "three");

        assert_eq!(store.get("pack", "value", 0i32), 0);
        assert_eq!(store.get_raw("pack", "value").and_then(|v| v.as_text()), Some("three"));
    }

    #[test]
    fn test_remove_namespace_and_iterate() {
        let mut store = AttributeStore::new();
        store.set("voxel-meta", "decorated", true);
        store.set("voxel-meta", "has-modified-name", false);
        store.set("pack", "kept", 1i32);

        assert_eq!(store.iter_namespace("voxel-meta").count(), 2);

        store.remove_namespace("voxel-meta");
        assert_eq!(store.len(), 1);
        assert!(store.has("pack", "kept"));
    }

    #[test]
    fn test_blob_round_trip() {
        let mut store = AttributeStore::new();
        store.set("pack", "bytes", vec![1u8, 2, 3]);
        store.set("pack", "longs", vec![10i64, -20]);
        store.set("pack", "flag", true);

        let blob = store.to_blob().unwrap();
        let decoded = AttributeStore::from_blob(&blob).unwrap();
        assert_eq!(decoded, store);
    }

    #[test]
    fn test_bad_blob_is_codec_error() {
        let err = AttributeStore::from_blob(&[0xFF; 3]).unwrap_err();
        assert!(matches!(err, crate::core::VoxelError::Codec(_)));
    }
}
