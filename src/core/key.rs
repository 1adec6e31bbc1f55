//! Namespaced keys.
//!
//! Every material, enchantment and translation entry is addressed by a
//! `NamespacedKey`: a `(namespace, identifier)` pair written canonically as
//! `namespace:identifier`.
//!
//! ## Character Set
//!
//! Both halves must be non-empty and may only contain `[a-z0-9._-]`.
//!
//! ```
//! use voxel_items::core::NamespacedKey;
//!
//! let key: NamespacedKey = "pack:ruby_ore".parse().unwrap();
//! assert_eq!(key.namespace(), "pack");
//! assert_eq!(key.identifier(), "ruby_ore");
//! assert_eq!(key.to_string(), "pack:ruby_ore");
//!
//! assert!("pack:Ruby".parse::<NamespacedKey>().is_err());
//! assert!("a:b:c".parse::<NamespacedKey>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Result, VoxelError};

/// Namespace of every material and enchantment the base game ships with.
pub const BUILTIN_NAMESPACE: &str = "minecraft";

/// A validated `namespace:identifier` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacedKey {
    namespace: String,
    identifier: String,
}

impl NamespacedKey {
    /// Create a key from its two halves, validating both.
    pub fn new(namespace: impl Into<String>, identifier: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let identifier = identifier.into();

        if !is_valid_segment(&namespace) {
            return Err(VoxelError::InvalidKeyFormat {
                input: format!("{namespace}:{identifier}"),
                reason: "invalid namespace",
            });
        }
        if !is_valid_segment(&identifier) {
            return Err(VoxelError::InvalidKeyFormat {
                input: format!("{namespace}:{identifier}"),
                reason: "invalid identifier",
            });
        }

        Ok(Self { namespace, identifier })
    }

    /// Create a key in the base game's namespace.
    pub fn builtin(identifier: impl Into<String>) -> Result<Self> {
        Self::new(BUILTIN_NAMESPACE, identifier)
    }

    /// Parse the canonical `namespace:identifier` form.
    ///
    /// Rejects anything that does not contain exactly one `:` splitting the
    /// input into two valid halves.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split(':');
        let (Some(namespace), Some(identifier), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(VoxelError::InvalidKeyFormat {
                input: input.to_string(),
                reason: "expected exactly one ':' separator",
            });
        };

        Self::new(namespace, identifier)
    }

    /// Build a key from literals known to be valid.
    ///
    /// Only used for the built-in tables compiled into the crate.
    pub(crate) fn from_static(namespace: &'static str, identifier: &'static str) -> Self {
        debug_assert!(is_valid_segment(namespace), "bad static namespace {namespace}");
        debug_assert!(is_valid_segment(identifier), "bad static identifier {identifier}");
        Self {
            namespace: namespace.to_string(),
            identifier: identifier.to_string(),
        }
    }

    /// The namespace half.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The identifier half.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Is this key in the base game's namespace?
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.namespace == BUILTIN_NAMESPACE
    }

    /// Render with a custom separator, e.g. `pack/ruby_ore` or `pack.ruby_ore`.
    #[must_use]
    pub fn join(&self, separator: char) -> String {
        format!("{}{}{}", self.namespace, separator, self.identifier)
    }
}

impl std::fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.identifier)
    }
}

impl FromStr for NamespacedKey {
    type Err = VoxelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespacedKey {
    type Error = VoxelError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<NamespacedKey> for String {
    fn from(key: NamespacedKey) -> Self {
        key.to_string()
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let key = NamespacedKey::parse("minecraft:stone").unwrap();
        assert_eq!(key.namespace(), "minecraft");
        assert_eq!(key.identifier(), "stone");
        assert!(key.is_builtin());
    }

    #[test]
    fn test_parse_allows_punctuation() {
        let key = NamespacedKey::parse("my-pack.v2:ore_1.5").unwrap();
        assert_eq!(key.namespace(), "my-pack.v2");
        assert_eq!(key.identifier(), "ore_1.5");
    }

    #[test]
    fn test_parse_rejects_bad_separators() {
        assert!(NamespacedKey::parse("stone").is_err());
        assert!(NamespacedKey::parse("a:b:c").is_err());
        assert!(NamespacedKey::parse(":stone").is_err());
        assert!(NamespacedKey::parse("minecraft:").is_err());
        assert!(NamespacedKey::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_chars() {
        assert!(NamespacedKey::parse("Minecraft:stone").is_err());
        assert!(NamespacedKey::parse("pack:ruby ore").is_err());
        assert!(NamespacedKey::parse("pack:ruby/ore").is_err());
    }

    #[test]
    fn test_display_and_join() {
        let key = NamespacedKey::new("pack", "vein_mining").unwrap();
        assert_eq!(key.to_string(), "pack:vein_mining");
        assert_eq!(key.join('/'), "pack/vein_mining");
        assert_eq!(key.join('.'), "pack.vein_mining");
        assert!(!key.is_builtin());
    }

    #[test]
    fn test_serde_as_string() {
        let key = NamespacedKey::new("pack", "ruby_ore").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"pack:ruby_ore\"");

        let back: NamespacedKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        assert!(serde_json::from_str::<NamespacedKey>("\"bad key\"").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = NamespacedKey::parse("a:b:c").unwrap_err();
        assert!(err.to_string().contains("a:b:c"));
    }
}
