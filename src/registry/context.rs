//! The owned registry context.
//!
//! `RegistryContext` bundles the material and enchantment registries with the
//! base catalog they adapt. It replaces process-wide registries: whoever owns
//! the context owns the registered content, and reloading rebuilds it in place.
//!
//! ## Reload Contract
//!
//! `Registry::clear` leaves a registry without even the base game's content.
//! Always follow a clear with [`RegistryContext::adapt_builtins`], or use
//! [`RegistryContext::reload`], which does both.

use tracing::info;

use super::enchantment::{EnchantmentDescriptor, EnchantmentFields};
use super::material::{MaterialDescriptor, MaterialFields};
use super::table::Registry;
use crate::platform::BaseCatalog;

/// Material and enchantment registries plus the base catalog.
#[derive(Clone, Debug)]
pub struct RegistryContext {
    pub materials: Registry<MaterialDescriptor>,
    pub enchantments: Registry<EnchantmentDescriptor>,
    catalog: BaseCatalog,
}

impl RegistryContext {
    /// Create a context with empty registries. Nothing is adapted yet.
    #[must_use]
    pub fn new(catalog: BaseCatalog) -> Self {
        Self {
            materials: Registry::new(),
            enchantments: Registry::new(),
            catalog,
        }
    }

    /// Create a context over the vanilla catalog with builtins adapted.
    #[must_use]
    pub fn vanilla() -> Self {
        let mut ctx = Self::new(BaseCatalog::vanilla());
        ctx.adapt_builtins();
        ctx
    }

    /// The base catalog.
    #[must_use]
    pub fn catalog(&self) -> &BaseCatalog {
        &self.catalog
    }

    /// Register a descriptor for every base material and native enchantment.
    ///
    /// Builtin registrations go through the same interceptor pipeline as
    /// custom ones, tagged with `Origin::Builtin`.
    pub fn adapt_builtins(&mut self) {
        let mut materials = 0usize;
        for base in self.catalog.materials() {
            if self.materials.register(MaterialFields::builtin(base.clone())).is_registered() {
                materials += 1;
            }
        }

        let mut enchantments = 0usize;
        for native in self.catalog.enchantments() {
            if self.enchantments.register(EnchantmentFields::builtin(native)).is_registered() {
                enchantments += 1;
            }
        }

        info!(materials, enchantments, "builtins adapted");
    }

    /// Clear both registries and re-run the adaptation pass.
    ///
    /// Custom content must be registered again by its owner afterwards.
    pub fn reload(&mut self) {
        self.materials.clear();
        self.enchantments.clear();
        self.adapt_builtins();
        info!(
            materials = self.materials.len(),
            enchantments = self.enchantments.len(),
            "registries reloaded"
        );
    }

    /// Immutable view for I/O threads. O(1); later changes are not visible.
    #[must_use]
    pub fn snapshot(&self) -> RegistryContext {
        self.clone()
    }
}

impl Default for RegistryContext {
    fn default() -> Self {
        Self::vanilla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NamespacedKey;
    use crate::platform::ItemCategory;

    #[test]
    fn test_vanilla_adapts_everything() {
        let ctx = RegistryContext::vanilla();
        assert_eq!(ctx.materials.len(), ctx.catalog().materials().count());
        assert_eq!(ctx.enchantments.len(), ctx.catalog().enchantments().count());

        let stone = ctx.catalog().builtin_material("stone").unwrap();
        let descriptor = ctx.materials.get_native(stone).unwrap();
        assert!(descriptor.is_builtin());
        assert_eq!(descriptor.base().category, ItemCategory::Block);
    }

    #[test]
    fn test_reload_drops_custom_content() {
        let mut ctx = RegistryContext::vanilla();
        let builtin_count = ctx.materials.len();
        let stone = ctx.catalog().builtin_material("stone").unwrap().clone();
        let key = NamespacedKey::parse("pack:ruby_ore").unwrap();
        ctx.materials.register(MaterialFields::new(key.clone(), stone));
        assert_eq!(ctx.materials.len(), builtin_count + 1);

        ctx.reload();
        assert_eq!(ctx.materials.len(), builtin_count);
        assert!(ctx.materials.get(&key).is_none());
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut ctx = RegistryContext::vanilla();
        let snapshot = ctx.snapshot();
        ctx.enchantments
            .register(EnchantmentFields::new(NamespacedKey::parse("pack:vein_mining").unwrap()));

        assert_eq!(snapshot.enchantments.len() + 1, ctx.enchantments.len());
    }
}
