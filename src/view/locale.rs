//! Localized display names.
//!
//! The view transform only needs one thing from localization: a display name
//! for a key in the viewer's locale. [`Localizer`] is that contract;
//! [`TranslationTable`] is an in-memory implementation fed from JSON
//! documents of the form `{"item.pack.ruby_ore": "Ruby Ore", ...}`.
//!
//! ## Lookup
//!
//! 1. Normalize the locale (`en-US` becomes `en_us`)
//! 2. Look up `<domain>.<namespace>.<identifier>` in that locale
//! 3. Then in the fallback locale, if one is set
//! 4. Otherwise return the key's identifier

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{NamespacedKey, Result};

/// Translation domain of material names.
pub const ITEM_DOMAIN: &str = "item";

/// Translation domain of enchantment names.
pub const ENCHANTMENT_DOMAIN: &str = "enchantment";

/// Source of localized names. Never fails.
pub trait Localizer: Send + Sync {
    fn name_for(&self, locale: &str, domain: &str, key: &NamespacedKey) -> String;
}

/// Normalize a locale tag: `-` becomes `_`, everything lower case.
#[must_use]
pub fn normalize_locale(locale: &str) -> String {
    locale.replace('-', "_").to_lowercase()
}

/// Translation key for `key` in `domain`.
#[must_use]
pub fn translation_key(domain: &str, key: &NamespacedKey) -> String {
    format!("{domain}.{}", key.join('.'))
}

/// Localizer without translations: always the identifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentifierLocalizer;

impl Localizer for IdentifierLocalizer {
    fn name_for(&self, _locale: &str, _domain: &str, key: &NamespacedKey) -> String {
        key.identifier().to_string()
    }
}

/// Per-locale translation maps.
#[derive(Clone, Debug, Default)]
pub struct TranslationTable {
    locales: FxHashMap<String, FxHashMap<String, String>>,
    fallback_locale: Option<String>,
}

impl TranslationTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `locale` when the viewer's locale has no entry (builder pattern).
    #[must_use]
    pub fn with_fallback_locale(mut self, locale: &str) -> Self {
        self.fallback_locale = Some(normalize_locale(locale));
        self
    }

    /// Add or replace one translation.
    pub fn insert(&mut self, locale: &str, translation_key: impl Into<String>, name: impl Into<String>) {
        self.locales
            .entry(normalize_locale(locale))
            .or_default()
            .insert(translation_key.into(), name.into());
    }

    /// Merge a JSON object of translations into `locale`.
    ///
    /// Later documents override earlier ones key by key. Returns the number of
    /// entries read.
    pub fn load_json(&mut self, locale: &str, json: &str) -> Result<usize> {
        let entries: FxHashMap<String, String> = serde_json::from_str(json)?;
        let count = entries.len();
        let locale = normalize_locale(locale);
        debug!(%locale, count, "translations loaded");
        self.locales.entry(locale).or_default().extend(entries);
        Ok(count)
    }

    /// Raw lookup of a translation key in one locale.
    #[must_use]
    pub fn get(&self, locale: &str, translation_key: &str) -> Option<&str> {
        self.locales
            .get(&normalize_locale(locale))
            .and_then(|map| map.get(translation_key))
            .map(String::as_str)
    }

    /// Normalized names of all loaded locales.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Total number of translations across locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.values().map(|map| map.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Localizer for TranslationTable {
    fn name_for(&self, locale: &str, domain: &str, key: &NamespacedKey) -> String {
        let tkey = translation_key(domain, key);
        self.get(locale, &tkey)
            .or_else(|| {
                self.fallback_locale
                    .as_deref()
                    .and_then(|fallback| self.get(fallback, &tkey))
            })
            .map_or_else(|| key.identifier().to_string(), str::to_string)
    }
}
