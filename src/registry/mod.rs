//! Registries for custom materials and enchantments.
//!
//! ## Key Types
//!
//! - `Registry<T>`: Ordered, key-indexed table of live descriptors
//! - `Interceptor<T>`: Named hook into the two-phase registration pipeline
//! - `MaterialDescriptor` / `EnchantmentDescriptor`: The registered records
//! - `RegistryContext`: Owns both registries and the base catalog
//!
//! ## Example
//!
//! ```
//! use voxel_items::core::NamespacedKey;
//! use voxel_items::registry::{EnchantmentFields, RegistryContext};
//!
//! let mut ctx = RegistryContext::vanilla();
//! let key: NamespacedKey = "pack:vein_mining".parse().unwrap();
//! ctx.enchantments.register(EnchantmentFields::new(key.clone()).with_max_level(3));
//!
//! assert_eq!(ctx.enchantments.get(&key).unwrap().max_level(), 3);
//! ```

pub mod context;
pub mod descriptor;
pub mod enchantment;
pub mod interceptor;
pub mod material;
pub mod table;

pub use context::RegistryContext;
pub use descriptor::{Descriptor, Origin, SETTINGS_NAMESPACE};
pub use enchantment::{roman_numeral, EnchantmentDescriptor, EnchantmentFields};
pub use interceptor::{
    Interceptor, InterceptorChain, Phase, Proposal, ProposalFn, Verdict, VetoFn,
};
pub use material::{MaterialDescriptor, MaterialFields, RenderType};
pub use table::{Registration, Registry};

pub use crate::platform::{EnchantmentTarget, Rarity};
