//! Enchantment descriptors.
//!
//! An enchantment is little more than a key plus settings. Everything that
//! drives behavior is read from the settings store, under the `attribute`
//! namespace, with a fallback default:
//!
//! | Setting                 | Kind      | Default  |
//! |-------------------------|-----------|----------|
//! | `max-level`             | int       | 1        |
//! | `rarity`                | int       | 1        |
//! | `enchantment-target`    | text      | `"TOOL"` |
//! | `incompatible-enchants` | text list | empty    |

use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, Origin, SETTINGS_NAMESPACE};
use crate::attributes::{AttributeKind, AttributeStore, AttributeValue};
use crate::core::NamespacedKey;
use crate::platform::{BaseMaterial, EnchantmentTarget, NativeEnchantment};

pub const MAX_LEVEL: &str = "max-level";
pub const RARITY: &str = "rarity";
pub const TARGET: &str = "enchantment-target";
pub const INCOMPATIBLE: &str = "incompatible-enchants";

/// Constructor fields for an enchantment, editable during the proposal phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentFields {
    pub key: NamespacedKey,
    pub settings: AttributeStore,
    pub origin: Origin,
}

impl EnchantmentFields {
    /// Fields for a custom enchantment with no settings.
    #[must_use]
    pub fn new(key: NamespacedKey) -> Self {
        Self {
            key,
            settings: AttributeStore::new(),
            origin: Origin::Custom,
        }
    }

    /// Fields seeded from a native enchantment's definition.
    #[must_use]
    pub fn builtin(native: &NativeEnchantment) -> Self {
        let mut fields = Self::new(native.key.clone())
            .with_max_level(i32::try_from(native.max_level).unwrap_or(i32::MAX))
            .with_rarity_weight(native.weight)
            .with_target(native.target);
        for other in &native.incompatible {
            fields = fields.incompatible_with(other);
        }
        fields.origin = Origin::Builtin;
        fields
    }

    /// Set `max-level` (builder pattern).
    #[must_use]
    pub fn with_max_level(self, level: i32) -> Self {
        self.with_setting(MAX_LEVEL, level)
    }

    /// Set the `rarity` weight (builder pattern).
    #[must_use]
    pub fn with_rarity_weight(self, weight: i32) -> Self {
        self.with_setting(RARITY, weight)
    }

    /// Set `enchantment-target` (builder pattern).
    #[must_use]
    pub fn with_target(self, target: EnchantmentTarget) -> Self {
        self.with_setting(TARGET, target.as_str())
    }

    /// Append to `incompatible-enchants` (builder pattern).
    #[must_use]
    pub fn incompatible_with(mut self, other: &NamespacedKey) -> Self {
        let mut list: Vec<String> = self.settings.get(SETTINGS_NAMESPACE, INCOMPATIBLE, Vec::new());
        let other = other.to_string();
        if !list.contains(&other) {
            list.push(other);
        }
        self.settings.set(SETTINGS_NAMESPACE, INCOMPATIBLE, list);
        self
    }

    /// Set an arbitrary setting (builder pattern).
    #[must_use]
    pub fn with_setting(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.settings.set(SETTINGS_NAMESPACE, key, value);
        self
    }
}

/// A registered enchantment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentDescriptor {
    key: NamespacedKey,
    settings: AttributeStore,
    origin: Origin,
}

impl EnchantmentDescriptor {
    #[must_use]
    pub fn key(&self) -> &NamespacedKey {
        &self.key
    }

    #[must_use]
    pub fn settings(&self) -> &AttributeStore {
        &self.settings
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Is this enchantment in the base game's namespace?
    ///
    /// Such enchantments are mirrored into the item's native enchantment
    /// list so the base game applies their effects.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.key.is_builtin()
    }

    /// Typed setting lookup with fallback.
    #[must_use]
    pub fn attribute<T: AttributeKind>(&self, key: &str, default: T) -> T {
        self.settings.get(SETTINGS_NAMESPACE, key, default)
    }

    /// Highest level a merge will produce. Never below 0.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        u32::try_from(self.attribute(MAX_LEVEL, 1i32)).unwrap_or(0)
    }

    /// Merge cost multiplier per level.
    #[must_use]
    pub fn rarity_weight(&self) -> i32 {
        self.attribute(RARITY, 1i32)
    }

    /// Applicable target classification; `None` when the setting names an
    /// unknown target, in which case the enchantment applies to nothing.
    #[must_use]
    pub fn target(&self) -> Option<EnchantmentTarget> {
        match self.settings.get_raw(SETTINGS_NAMESPACE, TARGET) {
            None => Some(EnchantmentTarget::Tool),
            Some(value) => value.as_text().and_then(EnchantmentTarget::parse),
        }
    }

    /// Can this enchantment go on items of `material`?
    #[must_use]
    pub fn can_enchant(&self, material: &BaseMaterial) -> bool {
        self.target().is_some_and(|t| t.includes(material))
    }

    /// Declared incompatibilities. Malformed entries are skipped.
    #[must_use]
    pub fn incompatible(&self) -> Vec<NamespacedKey> {
        self.settings
            .get_raw(SETTINGS_NAMESPACE, INCOMPATIBLE)
            .and_then(AttributeValue::as_text_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|s| NamespacedKey::parse(s).ok())
            .collect()
    }

    /// Does this enchantment declare `other` as incompatible?
    #[must_use]
    pub fn conflicts_with(&self, other: &NamespacedKey) -> bool {
        self.incompatible().iter().any(|k| k == other)
    }
}

impl Descriptor for EnchantmentDescriptor {
    type Fields = EnchantmentFields;

    const KIND: &'static str = "enchantment";

    fn key(&self) -> &NamespacedKey {
        &self.key
    }

    fn fields_key(fields: &EnchantmentFields) -> &NamespacedKey {
        &fields.key
    }

    fn build(fields: EnchantmentFields) -> Self {
        Self {
            key: fields.key,
            settings: fields.settings,
            origin: fields.origin,
        }
    }
}

const NUMERALS: [(u64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral for an enchantment level.
///
/// Zero is `"N"` (nulla); negative numbers get a leading `-`. Thousands are
/// written as repeated `M`, so output length grows linearly with `|n| / 1000`.
#[must_use]
pub fn roman_numeral(n: i64) -> String {
    if n == 0 {
        return "N".to_string();
    }

    let mut out = String::new();
    if n < 0 {
        out.push('-');
    }

    let mut rest = n.unsigned_abs();
    for (value, numeral) in NUMERALS {
        while rest >= value {
            out.push_str(numeral);
            rest -= value;
        }
    }
    out
}
