//! Concrete item stacks and their metadata.
//!
//! `ItemStack` is the payload the game stores in inventories and sends over the
//! network. It knows nothing about custom materials or enchantments: those
//! live in the model-hint channel and in the attribute store inside `ItemMeta`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::material::BaseMaterial;
use super::text::TextLine;
use crate::attributes::AttributeStore;
use crate::core::{NamespacedKey, Result, VoxelError};

/// Tooltip sections the client can be told to hide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemFlag {
    HideEnchants,
    HideStoredEnchants,
    HideAttributes,
    HideUnbreakable,
    HideDestroys,
    HidePlacedOn,
    HideDye,
}

impl ItemFlag {
    /// Stable name, used when recording flags as attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemFlag::HideEnchants => "HIDE_ENCHANTS",
            ItemFlag::HideStoredEnchants => "HIDE_STORED_ENCHANTS",
            ItemFlag::HideAttributes => "HIDE_ATTRIBUTES",
            ItemFlag::HideUnbreakable => "HIDE_UNBREAKABLE",
            ItemFlag::HideDestroys => "HIDE_DESTROYS",
            ItemFlag::HidePlacedOn => "HIDE_PLACED_ON",
            ItemFlag::HideDye => "HIDE_DYE",
        }
    }

    /// Inverse of [`ItemFlag::as_str`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let flag = match name {
            "HIDE_ENCHANTS" => ItemFlag::HideEnchants,
            "HIDE_STORED_ENCHANTS" => ItemFlag::HideStoredEnchants,
            "HIDE_ATTRIBUTES" => ItemFlag::HideAttributes,
            "HIDE_UNBREAKABLE" => ItemFlag::HideUnbreakable,
            "HIDE_DESTROYS" => ItemFlag::HideDestroys,
            "HIDE_PLACED_ON" => ItemFlag::HidePlacedOn,
            "HIDE_DYE" => ItemFlag::HideDye,
            _ => return None,
        };
        Some(flag)
    }
}

/// Editable metadata of an item stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Custom display name. `None` = client shows the default name.
    pub display_name: Option<TextLine>,

    /// Lore lines, top to bottom.
    pub lore: Vec<TextLine>,

    /// Enchantments the base game itself understands.
    pub enchants: BTreeMap<NamespacedKey, u32>,

    /// Force (or suppress) the enchantment glint. `None` = client decides.
    pub glint_override: Option<bool>,

    /// Hidden tooltip sections.
    pub flags: SmallVec<[ItemFlag; 4]>,

    /// Persistent attribute blob.
    pub data: AttributeStore,
}

impl ItemMeta {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `flag` set?
    #[must_use]
    pub fn has_flag(&self, flag: ItemFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Set a flag. Returns `true` if it was not set before.
    pub fn add_flag(&mut self, flag: ItemFlag) -> bool {
        if self.has_flag(flag) {
            return false;
        }
        self.flags.push(flag);
        true
    }

    /// Clear a flag. Returns `true` if it was set.
    pub fn remove_flag(&mut self, flag: ItemFlag) -> bool {
        let before = self.flags.len();
        self.flags.retain(|f| *f != flag);
        self.flags.len() != before
    }

    /// Does the item carry any native enchantment?
    #[must_use]
    pub fn has_native_enchants(&self) -> bool {
        !self.enchants.is_empty()
    }
}

/// A stack of items of one base material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The intrinsic base-game kind.
    pub material: BaseMaterial,

    /// Stack size. 0 = empty slot.
    pub amount: u8,

    /// Damage taken so far.
    pub damage: u16,

    /// Accumulated prior-work penalty from earlier merges.
    pub repair_cost: u32,

    model_hints: Vec<String>,

    pub(crate) meta: Option<ItemMeta>,
}

impl ItemStack {
    /// Create a single item of `material`.
    #[must_use]
    pub fn new(material: BaseMaterial) -> Self {
        Self {
            material,
            amount: 1,
            damage: 0,
            repair_cost: 0,
            model_hints: Vec::new(),
            meta: None,
        }
    }

    /// Set the stack size (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, amount: u8) -> Self {
        self.amount = amount;
        self
    }

    /// Set the damage (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, damage: u16) -> Self {
        self.damage = damage;
        self
    }

    /// Set the prior-work penalty (builder pattern).
    #[must_use]
    pub fn with_repair_cost(mut self, repair_cost: u32) -> Self {
        self.repair_cost = repair_cost;
        self
    }

    /// Is this an empty slot (air or zero amount)?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.material.is_air() || self.amount == 0
    }

    /// Can this stack carry metadata at all?
    #[must_use]
    pub fn supports_meta(&self) -> bool {
        !self.is_empty() && self.material.supports_meta
    }

    /// Current metadata, if any was written.
    #[must_use]
    pub fn meta(&self) -> Option<&ItemMeta> {
        self.meta.as_ref()
    }

    /// Metadata for editing, created on first use.
    ///
    /// Fails with `MetaUnavailable` for kinds that cannot carry metadata.
    pub fn meta_mut(&mut self) -> Result<&mut ItemMeta> {
        if !self.supports_meta() {
            return Err(VoxelError::MetaUnavailable {
                material: self.material.key.clone(),
            });
        }
        Ok(self.meta.get_or_insert_with(ItemMeta::default))
    }

    /// Drop all metadata.
    pub fn clear_meta(&mut self) {
        self.meta = None;
    }

    /// Raw model-hint strings (the client-side model selector channel).
    #[must_use]
    pub fn model_hints(&self) -> &[String] {
        &self.model_hints
    }

    /// Replace the model-hint strings.
    pub fn set_model_hints(&mut self, hints: Vec<String>) {
        self.model_hints = hints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::BaseCatalog;

    fn stack(id: &str) -> ItemStack {
        let catalog = BaseCatalog::vanilla();
        ItemStack::new(catalog.builtin_material(id).unwrap().clone())
    }

    #[test]
    fn test_meta_created_on_demand() {
        let mut item = stack("stone");
        assert!(item.meta().is_none());

        item.meta_mut().unwrap().lore.push("line".into());
        assert_eq!(item.meta().unwrap().lore.len(), 1);
    }

    #[test]
    fn test_air_has_no_meta() {
        let mut air = stack("air");
        assert!(air.is_empty());
        let err = air.meta_mut().unwrap_err();
        assert!(matches!(err, VoxelError::MetaUnavailable { .. }));
    }

    #[test]
    fn test_zero_amount_is_empty() {
        let item = stack("stone").with_amount(0);
        assert!(item.is_empty());
        assert!(!item.supports_meta());
    }

    #[test]
    fn test_flags() {
        let mut meta = ItemMeta::new();
        assert!(meta.add_flag(ItemFlag::HideEnchants));
        assert!(!meta.add_flag(ItemFlag::HideEnchants));
        assert!(meta.has_flag(ItemFlag::HideEnchants));
        assert!(meta.remove_flag(ItemFlag::HideEnchants));
        assert!(!meta.remove_flag(ItemFlag::HideEnchants));
    }

    #[test]
    fn test_flag_names() {
        for flag in [ItemFlag::HideEnchants, ItemFlag::HideAttributes, ItemFlag::HideDye] {
            assert_eq!(ItemFlag::parse(flag.as_str()), Some(flag));
        }
        assert_eq!(ItemFlag::parse("HIDE_EVERYTHING"), None);
    }
}
