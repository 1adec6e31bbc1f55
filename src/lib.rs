//! # voxel-items
//!
//! Custom materials, enchantments and items for a voxel game server, kept
//! wire-compatible with unmodified clients.
//!
//! ## Design Principles
//!
//! 1. **Base Game Underneath**: Every custom item is a base-game item. Its
//!    custom identity rides in the model-hint channel and its custom data in
//!    the per-item attribute blob, so nothing is lost when the payload is
//!    serialized by the base game.
//!
//! 2. **Owned Registries**: No global state. A `RegistryContext` owns the
//!    registered content and is rebuilt on reload.
//!
//! 3. **Two Views of an Item**: The server stores plain items; clients see
//!    decorated copies. Decoration is undone when items come back.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Registries use `im`, so snapshots for
//!   network threads are O(1) clones.
//!
//! - **Explicit Pipelines**: Registration runs through an ordered chain of
//!   named interceptors instead of an event bus.
//!
//! - **Closed Attribute Kinds**: Attribute values are a tagged enum; reading
//!   with the wrong kind yields the caller's default.
//!
//! ## Modules
//!
//! - `core`: Keys, errors, configuration, logging
//! - `attributes`: Typed, namespaced attribute stores
//! - `platform`: Base materials, item stacks, wire payloads
//! - `registry`: Descriptors, interceptors, registries
//! - `item`: Item identity and the `ItemInstance` editing façade
//! - `view`: Localization and the client view transform
//! - `merge`: Enchantment merging at repair stations

pub mod core;
pub mod attributes;
pub mod platform;
pub mod registry;
pub mod item;
pub mod view;
pub mod merge;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, LogConfig, MergeConfig, ViewConfig,
    NamespacedKey, BUILTIN_NAMESPACE,
    Result, VoxelError,
    init_tracing, init_tracing_default,
};

pub use crate::attributes::{AttributeKey, AttributeKind, AttributeStore, AttributeValue};

pub use crate::platform::{
    BaseCatalog, BaseMaterial, NativeEnchantment, ItemCategory,
    ItemStack, ItemMeta, ItemFlag, TextLine, WireItem,
};

pub use crate::registry::{
    Descriptor, Origin, Registry, Registration, RegistryContext,
    Interceptor, Proposal, Verdict, Phase,
    MaterialDescriptor, MaterialFields, RenderType, Rarity,
    EnchantmentDescriptor, EnchantmentFields, EnchantmentTarget,
};

pub use crate::item::ItemInstance;

pub use crate::view::{ClientView, Localizer, TranslationTable};

pub use crate::merge::{MergeEngine, MergeOutcome, MergeRejection};
