//! The contract every registrable descriptor fulfils.

use serde::{Deserialize, Serialize};

use crate::core::NamespacedKey;

/// Where a descriptor came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Adapted from the base game's own tables.
    Builtin,
    /// Registered by a content pack.
    #[default]
    Custom,
}

/// A record that can live in a [`Registry`](super::Registry).
///
/// Registration starts from mutable `Fields`, which interceptors may edit or
/// reject, and ends with an immutable descriptor built from them.
pub trait Descriptor: Send + Sync + 'static {
    /// Mutable constructor fields seen by the proposal phase.
    type Fields: Clone + Send;

    /// Human-readable kind, used in log lines.
    const KIND: &'static str;

    /// Canonical key of a built descriptor.
    fn key(&self) -> &NamespacedKey;

    /// Key the fields would register under.
    fn fields_key(fields: &Self::Fields) -> &NamespacedKey;

    /// Freeze the fields into a descriptor.
    fn build(fields: Self::Fields) -> Self;
}

/// Attribute namespace holding descriptor settings.
pub const SETTINGS_NAMESPACE: &str = "attribute";
