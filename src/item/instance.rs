//! Mutable view over one concrete item.
//!
//! An `ItemInstance` borrows an `ItemStack` for the duration of an operation.
//! It caches nothing: every read goes to the payload and every mutation is
//! written back before the method returns.
//!
//! ## Channels
//!
//! - Identity: the model-hint channel (see [`identity`](super::identity))
//! - Enchantments: attributes under the `voxelenchant` namespace, keyed by
//!   the enchantment key with `/` as separator (`pack/vein_mining`), holding
//!   the level as an int. Built-in enchantments are mirrored into the
//!   native enchantment list.
//! - Everything else: the stack's own metadata (name, lore, flags)
//!
//! ## Meta-less Items
//!
//! Some kinds (air) cannot carry metadata. Reads on them never fail and
//! answer as for an item without metadata: no name, no lore, no flags, no
//! enchantments and default attribute values. Every mutation of metadata
//! fails with `MetaUnavailable` instead of being dropped.
//!
//! ## Example
//!
//! ```
//! use voxel_items::core::NamespacedKey;
//! use voxel_items::item::ItemInstance;
//! use voxel_items::platform::{BaseCatalog, ItemStack};
//!
//! let catalog = BaseCatalog::vanilla();
//! let mut stack = ItemStack::new(catalog.builtin_material("diamond_pickaxe").unwrap().clone());
//! let vein: NamespacedKey = "pack:vein_mining".parse().unwrap();
//!
//! let mut item = ItemInstance::new(&mut stack);
//! item.add_enchant(&vein, 3).unwrap();
//! assert_eq!(item.enchant_level(&vein), 3);
//!
//! item.remove_enchant(&vein).unwrap();
//! assert!(!item.has_enchant(&vein));
//! ```

use std::sync::Arc;

use tracing::trace;

use super::identity;
use crate::attributes::{AttributeKind, AttributeValue};
use crate::core::{NamespacedKey, Result, VoxelError};
use crate::platform::{BaseCatalog, ItemFlag, ItemMeta, ItemStack, TextLine};
use crate::registry::{MaterialDescriptor, RegistryContext};

/// Attribute namespace of the enchantment channel.
pub const ENCHANT_NAMESPACE: &str = "voxelenchant";

/// Attribute namespace reserved for hidden bookkeeping.
pub const META_NAMESPACE: &str = "voxel-meta";

/// Highest level an enchanted book can store.
pub const MAX_BOOK_LEVEL: u32 = 255;

/// Attribute key of an enchantment in the enchantment channel.
#[must_use]
pub fn enchant_attribute_key(enchant: &NamespacedKey) -> String {
    enchant.join('/')
}

/// Level of `enchant` in a metadata's enchantment channel, 0 when absent.
#[must_use]
pub fn read_enchant_level(meta: &ItemMeta, enchant: &NamespacedKey) -> u32 {
    let level: i32 = meta.data.get(ENCHANT_NAMESPACE, &enchant_attribute_key(enchant), 0);
    u32::try_from(level).unwrap_or(0)
}

/// Mutable façade over a borrowed item stack.
#[derive(Debug)]
pub struct ItemInstance<'a> {
    stack: &'a mut ItemStack,
    identity: NamespacedKey,
}

impl<'a> ItemInstance<'a> {
    /// Wrap a stack.
    ///
    /// Re-resolves and re-stamps the identity, then lifts any native
    /// enchantment missing from the enchantment channel into it.
    pub fn new(stack: &'a mut ItemStack) -> Self {
        let identity = identity::resolve(stack);
        let mut item = Self { stack, identity };
        item.restamp();
        item.lift_native_enchants();
        item
    }

    /// The wrapped stack.
    #[must_use]
    pub fn stack(&self) -> &ItemStack {
        self.stack
    }

    fn restamp(&mut self) {
        if !self.stack.is_empty() {
            identity::stamp(self.stack, &self.identity);
        }
    }

    fn lift_native_enchants(&mut self) {
        let Some(meta) = self.stack.meta.as_mut() else {
            return;
        };

        let mut lifted = 0usize;
        for (key, level) in &meta.enchants {
            let attr = enchant_attribute_key(key);
            if !meta.data.has(ENCHANT_NAMESPACE, &attr) {
                meta.data.set(ENCHANT_NAMESPACE, &attr, clamp_level(*level));
                lifted += 1;
            }
        }
        if lifted > 0 {
            meta.glint_override = Some(true);
            trace!(lifted, "native enchantments lifted");
        }
    }

    fn edit<R>(&mut self, f: impl FnOnce(&mut ItemMeta) -> Result<R>) -> Result<R> {
        let out = f(self.stack.meta_mut()?)?;
        self.restamp();
        Ok(out)
    }

    // === Identity ===

    /// Key of the material this item represents.
    #[must_use]
    pub fn material_key(&self) -> NamespacedKey {
        identity::resolve(self.stack)
    }

    /// Descriptor of the material this item represents.
    #[must_use]
    pub fn material<'c>(&self, ctx: &'c RegistryContext) -> Option<&'c Arc<MaterialDescriptor>> {
        ctx.materials.get(&self.material_key())
    }

    /// Turn the item into another material.
    ///
    /// The base material is swapped when it differs and the new identity is
    /// stamped, even onto a base that cannot carry metadata. Fails with
    /// `MetaUnavailable`, leaving the item untouched, when the new base cannot
    /// carry metadata and the item holds any.
    pub fn set_material(&mut self, material: &MaterialDescriptor) -> Result<()> {
        let base = material.base();
        if self.stack.material != *base {
            if !base.supports_meta || base.is_air() {
                if self.stack.meta().is_some_and(|meta| *meta != ItemMeta::default()) {
                    return Err(VoxelError::MetaUnavailable {
                        material: base.key.clone(),
                    });
                }
                self.stack.clear_meta();
            }
            self.stack.material = base.clone();
        }
        self.identity = material.key().clone();
        identity::stamp(self.stack, &self.identity);
        Ok(())
    }

    // === Attributes ===

    /// Read a typed attribute. Missing keys and kind mismatches give `default`.
    #[must_use]
    pub fn attribute<T: AttributeKind>(&self, namespace: &str, key: &str, default: T) -> T {
        match self.stack.meta() {
            Some(meta) => meta.data.get(namespace, key, default),
            None => default,
        }
    }

    /// Write an attribute.
    pub fn set_attribute(
        &mut self,
        namespace: &str,
        key: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        self.edit(|meta| {
            meta.data.set(namespace, key, value);
            Ok(())
        })
    }

    /// Is the attribute present?
    #[must_use]
    pub fn has_attribute(&self, namespace: &str, key: &str) -> bool {
        self.stack.meta().is_some_and(|meta| meta.data.has(namespace, key))
    }

    /// Remove an attribute, returning the old value.
    pub fn remove_attribute(&mut self, namespace: &str, key: &str) -> Result<Option<AttributeValue>> {
        self.edit(|meta| Ok(meta.data.remove(namespace, key)))
    }

    // === Enchantments ===

    /// Set an enchantment level. Level 0 removes the enchantment.
    ///
    /// Built-in enchantments also go into the native list, without level
    /// caps. Either way the glint is forced on.
    pub fn add_enchant(&mut self, enchant: &NamespacedKey, level: u32) -> Result<()> {
        if level == 0 {
            return self.remove_enchant(enchant);
        }

        self.edit(|meta| {
            meta.data
                .set(ENCHANT_NAMESPACE, &enchant_attribute_key(enchant), clamp_level(level));
            if enchant.is_builtin() {
                meta.enchants.insert(enchant.clone(), level);
            }
            meta.glint_override = Some(true);
            Ok(())
        })
    }

    /// Remove an enchantment from both channels.
    ///
    /// Clears the glint override once the item carries no enchantment at all.
    pub fn remove_enchant(&mut self, enchant: &NamespacedKey) -> Result<()> {
        self.edit(|meta| {
            meta.data.remove(ENCHANT_NAMESPACE, &enchant_attribute_key(enchant));
            meta.enchants.remove(enchant);
            if !meta.has_native_enchants() && meta.data.iter_namespace(ENCHANT_NAMESPACE).next().is_none() {
                meta.glint_override = None;
            }
            Ok(())
        })
    }

    /// Does the enchantment channel hold this enchantment?
    #[must_use]
    pub fn has_enchant(&self, enchant: &NamespacedKey) -> bool {
        self.stack
            .meta()
            .is_some_and(|meta| meta.data.has(ENCHANT_NAMESPACE, &enchant_attribute_key(enchant)))
    }

    /// Level in the enchantment channel, 0 when absent.
    #[must_use]
    pub fn enchant_level(&self, enchant: &NamespacedKey) -> u32 {
        self.stack.meta().map_or(0, |meta| read_enchant_level(meta, enchant))
    }

    /// Does the item carry any enchantment, native or custom?
    #[must_use]
    pub fn has_any_enchant(&self) -> bool {
        self.stack.meta().is_some_and(|meta| {
            meta.has_native_enchants() || meta.data.iter_namespace(ENCHANT_NAMESPACE).next().is_some()
        })
    }

    /// All enchantments in the channel with a positive level, sorted by key.
    #[must_use]
    pub fn enchants(&self) -> Vec<(NamespacedKey, u32)> {
        let Some(meta) = self.stack.meta() else {
            return Vec::new();
        };

        let mut out: Vec<(NamespacedKey, u32)> = meta
            .data
            .iter_namespace(ENCHANT_NAMESPACE)
            .filter_map(|(attr, value)| {
                let (namespace, identifier) = attr.split_once('/')?;
                let key = NamespacedKey::new(namespace, identifier).ok()?;
                let level = u32::try_from(value.as_int()?).ok().filter(|l| *l > 0)?;
                Some((key, level))
            })
            .collect();
        out.sort();
        out
    }

    // === Display name ===

    #[must_use]
    pub fn display_name(&self) -> Option<&TextLine> {
        self.stack.meta().and_then(|meta| meta.display_name.as_ref())
    }

    pub fn set_display_name(&mut self, name: impl Into<TextLine>) -> Result<()> {
        let name = name.into();
        self.edit(|meta| {
            meta.display_name = Some(name);
            Ok(())
        })
    }

    pub fn clear_display_name(&mut self) -> Result<()> {
        self.edit(|meta| {
            meta.display_name = None;
            Ok(())
        })
    }

    // === Lore ===

    #[must_use]
    pub fn lore(&self) -> &[TextLine] {
        self.stack
            .meta()
            .map(|meta| meta.lore.as_slice())
            .unwrap_or_default()
    }

    pub fn set_lore(&mut self, lore: Vec<TextLine>) -> Result<()> {
        self.edit(|meta| {
            meta.lore = lore;
            Ok(())
        })
    }

    pub fn add_lore_line(&mut self, line: impl Into<TextLine>) -> Result<()> {
        let line = line.into();
        self.edit(|meta| {
            meta.lore.push(line);
            Ok(())
        })
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert_lore_line(&mut self, index: usize, line: impl Into<TextLine>) -> Result<()> {
        let line = line.into();
        self.edit(|meta| {
            let len = meta.lore.len();
            if index > len {
                return Err(VoxelError::LoreIndexOutOfRange { index, len });
            }
            meta.lore.insert(index, line);
            Ok(())
        })
    }

    pub fn set_lore_line(&mut self, index: usize, line: impl Into<TextLine>) -> Result<()> {
        let line = line.into();
        self.edit(|meta| {
            let len = meta.lore.len();
            let slot = meta
                .lore
                .get_mut(index)
                .ok_or(VoxelError::LoreIndexOutOfRange { index, len })?;
            *slot = line;
            Ok(())
        })
    }

    pub fn remove_lore_line(&mut self, index: usize) -> Result<TextLine> {
        self.edit(|meta| {
            let len = meta.lore.len();
            if index >= len {
                return Err(VoxelError::LoreIndexOutOfRange { index, len });
            }
            Ok(meta.lore.remove(index))
        })
    }

    pub fn remove_last_lore_line(&mut self) -> Result<Option<TextLine>> {
        self.edit(|meta| Ok(meta.lore.pop()))
    }

    /// Remove every line equal to `line`. Returns how many were removed.
    pub fn remove_lore_matching(&mut self, line: &TextLine) -> Result<usize> {
        self.edit(|meta| {
            let before = meta.lore.len();
            meta.lore.retain(|l| l != line);
            Ok(before - meta.lore.len())
        })
    }

    // === Flags and damage ===

    #[must_use]
    pub fn has_flag(&self, flag: ItemFlag) -> bool {
        self.stack.meta().is_some_and(|meta| meta.has_flag(flag))
    }

    pub fn add_flag(&mut self, flag: ItemFlag) -> Result<bool> {
        self.edit(|meta| Ok(meta.add_flag(flag)))
    }

    pub fn remove_flag(&mut self, flag: ItemFlag) -> Result<bool> {
        self.edit(|meta| Ok(meta.remove_flag(flag)))
    }

    #[must_use]
    pub fn damage(&self) -> u16 {
        self.stack.damage
    }

    /// Set damage, clamped to the base material's durability.
    pub fn set_damage(&mut self, damage: u16) {
        self.stack.damage = damage.min(self.stack.material.max_durability);
    }

    // === Factories ===

    /// A fresh enchanted book carrying one enchantment.
    ///
    /// The level is clamped to 255. `None` if the catalog has no
    /// `minecraft:enchanted_book`.
    #[must_use]
    pub fn enchanted_book(catalog: &BaseCatalog, enchant: &NamespacedKey, level: u32) -> Option<ItemStack> {
        let book = catalog.builtin_material("enchanted_book")?;
        let mut stack = ItemStack::new(book.clone());
        ItemInstance::new(&mut stack)
            .add_enchant(enchant, level.min(MAX_BOOK_LEVEL))
            .ok()?;
        Some(stack)
    }
}

fn clamp_level(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}
