//! The base game as the item core sees it.
//!
//! ## Key Types
//!
//! - `BaseMaterial` / `NativeEnchantment`: Built-in kinds and enchantments
//! - `BaseCatalog`: Table of everything built in
//! - `ItemStack` / `ItemMeta`: The concrete item payload
//! - `WireItem`: Serialized payload crossing the network

pub mod material;
pub mod stack;
pub mod text;
pub mod wire;

pub use material::{
    BaseCatalog, BaseMaterial, EnchantmentTarget, ItemCategory, NativeEnchantment, NativeRef,
    Rarity,
};
pub use stack::{ItemFlag, ItemMeta, ItemStack};
pub use text::TextLine;
pub use wire::WireItem;
