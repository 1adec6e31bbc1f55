//! Error types.
//!
//! Only genuinely exceptional conditions are errors here. Lookup misses are
//! `Option`s, attribute type mismatches resolve to the caller's default,
//! merge rejections and cancelled registrations are ordinary enum variants.

use super::key::NamespacedKey;

/// Errors raised by the item core.
#[derive(Debug, thiserror::Error)]
pub enum VoxelError {
    /// A namespace or identifier string was malformed.
    #[error("invalid key format {input:?}: {reason}")]
    InvalidKeyFormat { input: String, reason: &'static str },

    /// The item kind carries no editable metadata (an empty slot, air, ...).
    #[error("item of kind {material} carries no editable metadata")]
    MetaUnavailable { material: NamespacedKey },

    /// A lore edit addressed a line that does not exist.
    #[error("lore index {index} out of range (len {len})")]
    LoreIndexOutOfRange { index: usize, len: usize },

    /// Encoding or decoding a wire item or attribute blob failed.
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// A configuration or translation document could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VoxelError>;
