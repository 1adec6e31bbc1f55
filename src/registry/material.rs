//! Material descriptors.
//!
//! A `MaterialDescriptor` introduces a new item kind on top of a base-game
//! material. Clients only ever see the base material; the descriptor's key
//! travels in the item's model-hint channel and its behavior overrides live
//! in the settings store under the `attribute` namespace.
//!
//! ## Behavior Overrides
//!
//! | Setting                   | Kind  | Fallback                  |
//! |---------------------------|-------|---------------------------|
//! | `behavior.maxDurability`  | int   | base max durability       |
//! | `behavior.maxStackSize`   | int   | base max stack size       |
//! | `behavior.edible`         | bool  | base edibility            |
//! | `texture.type`            | text  | `"texture"` (3D if `"model"`) |

use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, Origin, SETTINGS_NAMESPACE};
use crate::attributes::{AttributeKind, AttributeStore, AttributeValue};
use crate::core::NamespacedKey;
use crate::platform::{BaseMaterial, Rarity};

/// How the client is told to render the material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderType {
    ItemModelId,
    ItemTextureId,
    BlockModelId,
    BlockTextureId,
    ArmorColor,
    ArmorModel,
    Trident,
    #[default]
    None,
}

/// Constructor fields for a material, editable during the proposal phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialFields {
    pub key: NamespacedKey,
    pub base: BaseMaterial,
    pub render_type: RenderType,
    pub rarity: Rarity,
    pub settings: AttributeStore,
    pub origin: Origin,
}

impl MaterialFields {
    /// Fields for a custom material over `base`, common rarity, no settings.
    #[must_use]
    pub fn new(key: NamespacedKey, base: BaseMaterial) -> Self {
        Self {
            key,
            base,
            render_type: RenderType::None,
            rarity: Rarity::Common,
            settings: AttributeStore::new(),
            origin: Origin::Custom,
        }
    }

    /// Fields adapting a base material as-is.
    #[must_use]
    pub fn builtin(base: BaseMaterial) -> Self {
        Self {
            key: base.key.clone(),
            rarity: base.rarity,
            render_type: RenderType::None,
            settings: AttributeStore::new(),
            origin: Origin::Builtin,
            base,
        }
    }

    /// Set the render type (builder pattern).
    #[must_use]
    pub fn with_render_type(mut self, render_type: RenderType) -> Self {
        self.render_type = render_type;
        self
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Add a setting under the `attribute` namespace (builder pattern).
    #[must_use]
    pub fn with_setting(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.settings.set(SETTINGS_NAMESPACE, key, value);
        self
    }

    /// Replace all settings (builder pattern).
    #[must_use]
    pub fn with_settings(mut self, settings: AttributeStore) -> Self {
        self.settings = settings;
        self
    }
}

/// A registered material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    key: NamespacedKey,
    base: BaseMaterial,
    render_type: RenderType,
    rarity: Rarity,
    settings: AttributeStore,
    origin: Origin,
}

impl MaterialDescriptor {
    #[must_use]
    pub fn key(&self) -> &NamespacedKey {
        &self.key
    }

    /// The base-game material clients see.
    #[must_use]
    pub fn base(&self) -> &BaseMaterial {
        &self.base
    }

    #[must_use]
    pub fn render_type(&self) -> RenderType {
        self.render_type
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    #[must_use]
    pub fn settings(&self) -> &AttributeStore {
        &self.settings
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Was this adapted from the base game?
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.origin == Origin::Builtin
    }

    /// Typed setting lookup with fallback.
    #[must_use]
    pub fn attribute<T: AttributeKind>(&self, key: &str, default: T) -> T {
        self.settings.get(SETTINGS_NAMESPACE, key, default)
    }

    /// Maximum durability, overridable by `behavior.maxDurability`.
    ///
    /// Out-of-range overrides are clamped to `0..=u16::MAX`.
    #[must_use]
    pub fn max_durability(&self) -> u16 {
        let value = self.attribute("behavior.maxDurability", i32::from(self.base.max_durability));
        u16::try_from(value.max(0)).unwrap_or(u16::MAX)
    }

    /// Maximum stack size, overridable by `behavior.maxStackSize`.
    #[must_use]
    pub fn max_stack_size(&self) -> u8 {
        let value = self.attribute("behavior.maxStackSize", i32::from(self.base.max_stack_size));
        u8::try_from(value.max(1)).unwrap_or(u8::MAX)
    }

    /// Edibility, overridable by `behavior.edible`.
    #[must_use]
    pub fn is_edible(&self) -> bool {
        self.attribute("behavior.edible", self.base.edible)
    }

    /// Does the material ship a 3D model (`texture.type` = `"model"`)?
    #[must_use]
    pub fn has_3d_model(&self) -> bool {
        self.settings
            .get_raw(SETTINGS_NAMESPACE, "texture.type")
            .and_then(AttributeValue::as_text)
            .is_some_and(|t| t == "model")
    }
}

impl Descriptor for MaterialDescriptor {
    type Fields = MaterialFields;

    const KIND: &'static str = "material";

    fn key(&self) -> &NamespacedKey {
        &self.key
    }

    fn fields_key(fields: &MaterialFields) -> &NamespacedKey {
        &fields.key
    }

    fn build(fields: MaterialFields) -> Self {
        Self {
            key: fields.key,
            base: fields.base,
            render_type: fields.render_type,
            rarity: fields.rarity,
            settings: fields.settings,
            origin: fields.origin,
        }
    }
}
