//! Built-in game materials and enchantments.
//!
//! These types describe what the unmodified base game knows about: its item
//! kinds (`BaseMaterial`), its enchantments (`NativeEnchantment`) and the
//! classification used to decide which items an enchantment applies to
//! (`EnchantmentTarget`). `BaseCatalog` is the table of all of them; the
//! registry adapts every catalog entry into a descriptor at startup.

use serde::{Deserialize, Serialize};

use crate::core::{NamespacedKey, BUILTIN_NAMESPACE};

/// Item rarity, each with a display color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Creative,
}

impl Rarity {
    /// Display color as 0xRRGGBB.
    #[must_use]
    pub const fn color(self) -> u32 {
        match self {
            Rarity::Common => 0xFFFFFF,
            Rarity::Uncommon => 0xFFFF55,
            Rarity::Rare => 0x55FFFF,
            Rarity::Epic => 0xFF55FF,
            Rarity::Legendary => 0xFFAA00,
            Rarity::Mythic => 0xFF5555,
            Rarity::Creative => 0xFF0000,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
            Rarity::Creative => "Creative",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X} {}", self.color(), self.display_name())
    }
}

/// Coarse item classification used for enchantment applicability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Air,
    Block,
    Tool,
    Weapon,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    /// Worn in an armor slot without being armor (heads, pumpkins, elytra).
    Wearable,
    Bow,
    Crossbow,
    Trident,
    FishingRod,
    Book,
    EnchantedBook,
    Misc,
}

impl ItemCategory {
    /// Is this one of the four armor pieces?
    #[must_use]
    pub const fn is_armor(self) -> bool {
        matches!(
            self,
            ItemCategory::Helmet | ItemCategory::Chestplate | ItemCategory::Leggings | ItemCategory::Boots
        )
    }
}

/// Which items an enchantment may be applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantmentTarget {
    All,
    Armor,
    ArmorHead,
    ArmorTorso,
    ArmorLegs,
    ArmorFeet,
    Weapon,
    Tool,
    Bow,
    Crossbow,
    Trident,
    FishingRod,
    Breakable,
    Wearable,
    Vanishing,
}

impl EnchantmentTarget {
    /// Parse the upper-case setting name (`"TOOL"`, `"ARMOR_FEET"`, ...).
    ///
    /// Matching is case-insensitive. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let target = match name.to_ascii_uppercase().as_str() {
            "ALL" => EnchantmentTarget::All,
            "ARMOR" => EnchantmentTarget::Armor,
            "ARMOR_HEAD" => EnchantmentTarget::ArmorHead,
            "ARMOR_TORSO" => EnchantmentTarget::ArmorTorso,
            "ARMOR_LEGS" => EnchantmentTarget::ArmorLegs,
            "ARMOR_FEET" => EnchantmentTarget::ArmorFeet,
            "WEAPON" => EnchantmentTarget::Weapon,
            "TOOL" => EnchantmentTarget::Tool,
            "BOW" => EnchantmentTarget::Bow,
            "CROSSBOW" => EnchantmentTarget::Crossbow,
            "TRIDENT" => EnchantmentTarget::Trident,
            "FISHING_ROD" => EnchantmentTarget::FishingRod,
            "BREAKABLE" => EnchantmentTarget::Breakable,
            "WEARABLE" => EnchantmentTarget::Wearable,
            "VANISHING" => EnchantmentTarget::Vanishing,
            _ => return None,
        };
        Some(target)
    }

    /// The setting name, inverse of [`EnchantmentTarget::parse`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EnchantmentTarget::All => "ALL",
            EnchantmentTarget::Armor => "ARMOR",
            EnchantmentTarget::ArmorHead => "ARMOR_HEAD",
            EnchantmentTarget::ArmorTorso => "ARMOR_TORSO",
            EnchantmentTarget::ArmorLegs => "ARMOR_LEGS",
            EnchantmentTarget::ArmorFeet => "ARMOR_FEET",
            EnchantmentTarget::Weapon => "WEAPON",
            EnchantmentTarget::Tool => "TOOL",
            EnchantmentTarget::Bow => "BOW",
            EnchantmentTarget::Crossbow => "CROSSBOW",
            EnchantmentTarget::Trident => "TRIDENT",
            EnchantmentTarget::FishingRod => "FISHING_ROD",
            EnchantmentTarget::Breakable => "BREAKABLE",
            EnchantmentTarget::Wearable => "WEARABLE",
            EnchantmentTarget::Vanishing => "VANISHING",
        }
    }

    /// Does this target include items of `material`?
    #[must_use]
    pub fn includes(self, material: &BaseMaterial) -> bool {
        let category = material.category;
        match self {
            EnchantmentTarget::All => category != ItemCategory::Air,
            EnchantmentTarget::Armor => category.is_armor(),
            EnchantmentTarget::ArmorHead => category == ItemCategory::Helmet,
            EnchantmentTarget::ArmorTorso => category == ItemCategory::Chestplate,
            EnchantmentTarget::ArmorLegs => category == ItemCategory::Leggings,
            EnchantmentTarget::ArmorFeet => category == ItemCategory::Boots,
            EnchantmentTarget::Weapon => category == ItemCategory::Weapon,
            EnchantmentTarget::Tool => category == ItemCategory::Tool,
            EnchantmentTarget::Bow => category == ItemCategory::Bow,
            EnchantmentTarget::Crossbow => category == ItemCategory::Crossbow,
            EnchantmentTarget::Trident => category == ItemCategory::Trident,
            EnchantmentTarget::FishingRod => category == ItemCategory::FishingRod,
            EnchantmentTarget::Breakable => material.max_durability > 0,
            EnchantmentTarget::Wearable => category.is_armor() || category == ItemCategory::Wearable,
            EnchantmentTarget::Vanishing => {
                material.max_durability > 0
                    || category.is_armor()
                    || category == ItemCategory::Wearable
            }
        }
    }
}

/// A built-in item kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseMaterial {
    /// Canonical key, always in the built-in namespace for catalog entries.
    pub key: NamespacedKey,

    /// Classification for enchantment targets.
    pub category: ItemCategory,

    /// Maximum damage before breaking. 0 = not damageable.
    pub max_durability: u16,

    /// Largest stack the client accepts.
    pub max_stack_size: u8,

    /// Can stacks of this kind carry metadata (name, lore, attributes)?
    pub supports_meta: bool,

    /// Intrinsic rarity.
    pub rarity: Rarity,

    /// Can it be eaten?
    pub edible: bool,
}

impl BaseMaterial {
    /// Create a material with meta support, a stack size of 64 and no durability.
    #[must_use]
    pub fn new(key: NamespacedKey, category: ItemCategory) -> Self {
        Self {
            key,
            category,
            max_durability: 0,
            max_stack_size: 64,
            supports_meta: category != ItemCategory::Air,
            rarity: Rarity::Common,
            edible: false,
        }
    }

    /// Give the material durability (and a stack size of 1).
    #[must_use]
    pub fn with_durability(mut self, max_durability: u16) -> Self {
        self.max_durability = max_durability;
        self.max_stack_size = 1;
        self
    }

    /// Set the maximum stack size.
    #[must_use]
    pub fn with_stack_size(mut self, size: u8) -> Self {
        self.max_stack_size = size;
        self
    }

    /// Set the intrinsic rarity.
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Mark as edible.
    #[must_use]
    pub fn edible(mut self) -> Self {
        self.edible = true;
        self
    }

    /// Mark as unable to carry metadata.
    #[must_use]
    pub fn without_meta(mut self) -> Self {
        self.supports_meta = false;
        self
    }

    /// Is this the empty-slot kind?
    #[must_use]
    pub fn is_air(&self) -> bool {
        self.category == ItemCategory::Air
    }

    /// Can stacks of this kind take damage?
    #[must_use]
    pub fn is_damageable(&self) -> bool {
        self.max_durability > 0
    }
}

/// A built-in enchantment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeEnchantment {
    pub key: NamespacedKey,
    pub max_level: u32,
    /// Merge cost multiplier per level.
    pub weight: i32,
    pub target: EnchantmentTarget,
    pub incompatible: Vec<NamespacedKey>,
}

impl NativeEnchantment {
    /// Create a native enchantment with no incompatibilities.
    #[must_use]
    pub fn new(key: NamespacedKey, max_level: u32, weight: i32, target: EnchantmentTarget) -> Self {
        Self {
            key,
            max_level,
            weight,
            target,
            incompatible: Vec::new(),
        }
    }

    /// Declare an incompatibility (builder pattern).
    #[must_use]
    pub fn incompatible_with(mut self, other: NamespacedKey) -> Self {
        if !self.incompatible.contains(&other) {
            self.incompatible.push(other);
        }
        self
    }
}

/// Platform-native objects that have a canonical key.
pub trait NativeRef {
    fn native_key(&self) -> &NamespacedKey;
}

impl NativeRef for BaseMaterial {
    fn native_key(&self) -> &NamespacedKey {
        &self.key
    }
}

impl NativeRef for NativeEnchantment {
    fn native_key(&self) -> &NamespacedKey {
        &self.key
    }
}

/// Table of everything the base game ships with.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BaseCatalog {
    materials: Vec<BaseMaterial>,
    enchantments: Vec<NativeEnchantment>,
}

impl BaseCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material (builder pattern). Replaces an entry with the same key.
    #[must_use]
    pub fn with_material(mut self, material: BaseMaterial) -> Self {
        self.materials.retain(|m| m.key != material.key);
        self.materials.push(material);
        self
    }

    /// Add an enchantment (builder pattern). Replaces an entry with the same key.
    #[must_use]
    pub fn with_enchantment(mut self, enchantment: NativeEnchantment) -> Self {
        self.enchantments.retain(|e| e.key != enchantment.key);
        self.enchantments.push(enchantment);
        self
    }

    /// Look up a material.
    #[must_use]
    pub fn material(&self, key: &NamespacedKey) -> Option<&BaseMaterial> {
        self.materials.iter().find(|m| &m.key == key)
    }

    /// Look up a material by identifier in the built-in namespace.
    #[must_use]
    pub fn builtin_material(&self, identifier: &str) -> Option<&BaseMaterial> {
        self.materials
            .iter()
            .find(|m| m.key.namespace() == BUILTIN_NAMESPACE && m.key.identifier() == identifier)
    }

    /// Look up an enchantment.
    #[must_use]
    pub fn enchantment(&self, key: &NamespacedKey) -> Option<&NativeEnchantment> {
        self.enchantments.iter().find(|e| &e.key == key)
    }

    /// All materials in catalog order.
    pub fn materials(&self) -> impl Iterator<Item = &BaseMaterial> {
        self.materials.iter()
    }

    /// All enchantments in catalog order.
    pub fn enchantments(&self) -> impl Iterator<Item = &NativeEnchantment> {
        self.enchantments.iter()
    }

    /// A representative slice of the vanilla game.
    #[must_use]
    pub fn vanilla() -> Self {
        let mc = |id: &'static str| NamespacedKey::from_static(BUILTIN_NAMESPACE, id);
        use ItemCategory as C;

        let materials = vec![
            BaseMaterial::new(mc("air"), C::Air).without_meta(),
            BaseMaterial::new(mc("stone"), C::Block),
            BaseMaterial::new(mc("dirt"), C::Block),
            BaseMaterial::new(mc("oak_log"), C::Block),
            BaseMaterial::new(mc("diamond"), C::Misc),
            BaseMaterial::new(mc("stick"), C::Misc),
            BaseMaterial::new(mc("apple"), C::Misc).edible(),
            BaseMaterial::new(mc("golden_apple"), C::Misc).edible().with_rarity(Rarity::Rare),
            BaseMaterial::new(mc("enchanted_golden_apple"), C::Misc)
                .edible()
                .with_rarity(Rarity::Epic),
            BaseMaterial::new(mc("book"), C::Book),
            BaseMaterial::new(mc("enchanted_book"), C::EnchantedBook)
                .with_stack_size(1)
                .with_rarity(Rarity::Uncommon),
            BaseMaterial::new(mc("iron_sword"), C::Weapon).with_durability(250),
            BaseMaterial::new(mc("diamond_sword"), C::Weapon).with_durability(1561),
            BaseMaterial::new(mc("iron_pickaxe"), C::Tool).with_durability(250),
            BaseMaterial::new(mc("diamond_pickaxe"), C::Tool).with_durability(1561),
            BaseMaterial::new(mc("diamond_axe"), C::Tool).with_durability(1561),
            BaseMaterial::new(mc("diamond_shovel"), C::Tool).with_durability(1561),
            BaseMaterial::new(mc("diamond_helmet"), C::Helmet).with_durability(363),
            BaseMaterial::new(mc("diamond_chestplate"), C::Chestplate).with_durability(528),
            BaseMaterial::new(mc("diamond_leggings"), C::Leggings).with_durability(495),
            BaseMaterial::new(mc("diamond_boots"), C::Boots).with_durability(429),
            BaseMaterial::new(mc("carved_pumpkin"), C::Wearable),
            BaseMaterial::new(mc("elytra"), C::Wearable)
                .with_durability(432)
                .with_rarity(Rarity::Uncommon),
            BaseMaterial::new(mc("bow"), C::Bow).with_durability(384),
            BaseMaterial::new(mc("crossbow"), C::Crossbow).with_durability(465),
            BaseMaterial::new(mc("trident"), C::Trident)
                .with_durability(250)
                .with_rarity(Rarity::Epic),
            BaseMaterial::new(mc("fishing_rod"), C::FishingRod).with_durability(64),
        ];

        use EnchantmentTarget as T;
        let enchantments = vec![
            NativeEnchantment::new(mc("sharpness"), 5, 1, T::Weapon)
                .incompatible_with(mc("smite"))
                .incompatible_with(mc("bane_of_arthropods")),
            NativeEnchantment::new(mc("smite"), 5, 2, T::Weapon)
                .incompatible_with(mc("sharpness"))
                .incompatible_with(mc("bane_of_arthropods")),
            NativeEnchantment::new(mc("bane_of_arthropods"), 5, 2, T::Weapon)
                .incompatible_with(mc("sharpness"))
                .incompatible_with(mc("smite")),
            NativeEnchantment::new(mc("efficiency"), 5, 1, T::Tool),
            NativeEnchantment::new(mc("silk_touch"), 1, 8, T::Tool).incompatible_with(mc("fortune")),
            NativeEnchantment::new(mc("fortune"), 3, 4, T::Tool).incompatible_with(mc("silk_touch")),
            NativeEnchantment::new(mc("unbreaking"), 3, 2, T::Breakable),
            NativeEnchantment::new(mc("mending"), 1, 4, T::Breakable).incompatible_with(mc("infinity")),
            NativeEnchantment::new(mc("power"), 5, 1, T::Bow),
            NativeEnchantment::new(mc("infinity"), 1, 8, T::Bow).incompatible_with(mc("mending")),
            NativeEnchantment::new(mc("protection"), 4, 1, T::Armor)
                .incompatible_with(mc("fire_protection")),
            NativeEnchantment::new(mc("fire_protection"), 4, 2, T::Armor)
                .incompatible_with(mc("protection")),
            NativeEnchantment::new(mc("feather_falling"), 4, 2, T::ArmorFeet),
            NativeEnchantment::new(mc("loyalty"), 3, 1, T::Trident).incompatible_with(mc("riptide")),
            NativeEnchantment::new(mc("riptide"), 3, 4, T::Trident).incompatible_with(mc("loyalty")),
            NativeEnchantment::new(mc("lure"), 3, 4, T::FishingRod),
            NativeEnchantment::new(mc("vanishing_curse"), 1, 8, T::Vanishing),
        ];

        Self {
            materials,
            enchantments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> NamespacedKey {
        NamespacedKey::parse(s).unwrap()
    }

    #[test]
    fn test_rarity_display() {
        assert_eq!(Rarity::Rare.color(), 0x55FFFF);
        assert_eq!(Rarity::Rare.to_string(), "#55FFFF Rare");
        assert_eq!(Rarity::default(), Rarity::Common);
    }

    #[test]
    fn test_target_parse_round_trip() {
        for name in ["ALL", "ARMOR_FEET", "tool", "Fishing_Rod", "VANISHING"] {
            let target = EnchantmentTarget::parse(name).unwrap();
            assert_eq!(target.as_str(), name.to_ascii_uppercase());
        }
        assert_eq!(EnchantmentTarget::parse("SPOON"), None);
    }

    #[test]
    fn test_target_includes() {
        let catalog = BaseCatalog::vanilla();
        let pick = catalog.builtin_material("diamond_pickaxe").unwrap();
        let sword = catalog.builtin_material("diamond_sword").unwrap();
        let boots = catalog.builtin_material("diamond_boots").unwrap();
        let stone = catalog.builtin_material("stone").unwrap();
        let air = catalog.builtin_material("air").unwrap();

        assert!(EnchantmentTarget::Tool.includes(pick));
        assert!(!EnchantmentTarget::Tool.includes(sword));
        assert!(EnchantmentTarget::Weapon.includes(sword));
        assert!(EnchantmentTarget::Armor.includes(boots));
        assert!(EnchantmentTarget::ArmorFeet.includes(boots));
        assert!(!EnchantmentTarget::ArmorHead.includes(boots));
        assert!(EnchantmentTarget::Breakable.includes(pick));
        assert!(!EnchantmentTarget::Breakable.includes(stone));
        assert!(EnchantmentTarget::All.includes(stone));
        assert!(!EnchantmentTarget::All.includes(air));
    }

    #[test]
    fn test_vanilla_catalog() {
        let catalog = BaseCatalog::vanilla();

        let air = catalog.material(&key("minecraft:air")).unwrap();
        assert!(air.is_air());
        assert!(!air.supports_meta);

        let sword = catalog.material(&key("minecraft:diamond_sword")).unwrap();
        assert!(sword.is_damageable());
        assert_eq!(sword.max_stack_size, 1);

        let sharpness = catalog.enchantment(&key("minecraft:sharpness")).unwrap();
        assert_eq!(sharpness.max_level, 5);
        assert!(sharpness.incompatible.contains(&key("minecraft:smite")));

        assert!(catalog.material(&key("pack:ruby_ore")).is_none());
    }

    #[test]
    fn test_catalog_replaces_duplicates() {
        let catalog = BaseCatalog::new()
            .with_material(BaseMaterial::new(key("minecraft:stone"), ItemCategory::Block))
            .with_material(
                BaseMaterial::new(key("minecraft:stone"), ItemCategory::Block).with_rarity(Rarity::Epic),
            );

        assert_eq!(catalog.materials().count(), 1);
        assert_eq!(catalog.builtin_material("stone").unwrap().rarity, Rarity::Epic);
    }
}
