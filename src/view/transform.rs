//! The client view transform.
//!
//! Unmodified clients know nothing about custom materials or enchantments, so
//! every item leaving the server is *decorated*: it gets a readable name and
//! one lore line per custom enchantment. Items coming back from the client are
//! *reverted* so the decoration never leaks into stored items.
//!
//! ## Decoration Marker
//!
//! `decorate` records what it did in hidden attributes under `voxel-meta`:
//!
//! - `decorated`: the marker itself
//! - `has-modified-name`: the display name was synthesized
//! - `synthetic-lore`: plain text of every inserted lore line
//! - `hidden-flags`: tooltip flags that were not set before
//! - `created-meta`: the item had no metadata at all
//!
//! `has-modified-name` and `created-meta` are written even when the marker is
//! disabled. Decorating an already decorated copy undoes the earlier pass
//! first, so the bookkeeping always describes the stored item.
//!
//! With the marker, `revert` undoes exactly that, whatever locale the viewer
//! has switched to in the meantime. Without it (older items, or the marker
//! disabled in [`ViewConfig`]) `revert` falls back to text heuristics.
//!
//! Both directions work on private copies and never touch the registries, so
//! a `ClientView` can be shared with network threads.

use std::sync::Arc;

use tracing::{debug, trace};

use super::locale::{Localizer, ENCHANTMENT_DOMAIN, ITEM_DOMAIN};
use crate::core::{Result, ViewConfig};
use crate::item::{identity, read_enchant_level, META_NAMESPACE};
use crate::platform::{ItemFlag, ItemMeta, ItemStack, TextLine, WireItem};
use crate::registry::{roman_numeral, RegistryContext};

pub const DECORATED: &str = "decorated";
pub const HAS_MODIFIED_NAME: &str = "has-modified-name";
pub const SYNTHETIC_LORE: &str = "synthetic-lore";
pub const HIDDEN_FLAGS: &str = "hidden-flags";
pub const CREATED_META: &str = "created-meta";

/// Flags set once any enchantment line is rendered.
const SUPPRESSED_TOOLTIPS: [ItemFlag; 3] = [
    ItemFlag::HideEnchants,
    ItemFlag::HideStoredEnchants,
    ItemFlag::HideAttributes,
];

/// Decorates outgoing items and reverts incoming ones.
#[derive(Clone)]
pub struct ClientView {
    ctx: RegistryContext,
    localizer: Arc<dyn Localizer>,
    config: ViewConfig,
}

impl ClientView {
    /// Create a view over a registry snapshot.
    pub fn new(ctx: RegistryContext, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            ctx,
            localizer,
            config: ViewConfig::default(),
        }
    }

    /// Set the view configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn context(&self) -> &RegistryContext {
        &self.ctx
    }

    /// Serialize `stack` for a viewer with `locale`.
    ///
    /// The stack itself is never modified.
    pub fn decorate(&self, stack: &ItemStack, locale: &str) -> Result<WireItem> {
        WireItem::encode(&self.decorated(stack, locale))
    }

    /// The decorated copy `decorate` would serialize.
    #[must_use]
    pub fn decorated(&self, stack: &ItemStack, locale: &str) -> ItemStack {
        let mut copy = stack.clone();
        if copy.supports_meta() {
            self.decorate_in_place(&mut copy, locale);
        }
        copy
    }

    fn decorate_in_place(&self, stack: &mut ItemStack, locale: &str) {
        let material_key = identity::resolve(stack);
        let rarity = self
            .ctx
            .materials
            .get(&material_key)
            .map_or(stack.material.rarity, |m| m.rarity());

        let mut created_meta = stack.meta.is_none();
        let meta = stack.meta.get_or_insert_with(ItemMeta::default);

        // A copy that already went through decoration is reverted first so
        // the bookkeeping below describes the stored item, not the copy.
        if meta.data.has(META_NAMESPACE, HAS_MODIFIED_NAME) {
            created_meta = meta.data.get(META_NAMESPACE, CREATED_META, false);
            if meta.data.get(META_NAMESPACE, DECORATED, false) {
                revert_marked(meta);
            } else {
                self.revert_heuristic(meta, locale);
            }
            meta.data.remove_namespace(META_NAMESPACE);
        }

        let modified_name = meta.display_name.is_none();
        if modified_name {
            let name = self.localizer.name_for(locale, ITEM_DOMAIN, &material_key);
            let color = if self.config.color_names_by_rarity {
                rarity.color()
            } else {
                self.config.fallback_name_color
            };
            meta.display_name = Some(TextLine::new(name).with_color(color).non_italic());
        }

        let mut synthetic: Vec<TextLine> = Vec::new();
        let mut rest = std::mem::take(&mut meta.lore);
        for enchantment in self.ctx.enchantments.values().rev() {
            let level = read_enchant_level(meta, enchantment.key());
            if level == 0 {
                continue;
            }

            let name = self.localizer.name_for(locale, ENCHANTMENT_DOMAIN, enchantment.key());
            let prefix = format!("{name} ");
            rest.retain(|line| !line.starts_with(&prefix));

            let text = format!("{prefix}{}", roman_numeral(i64::from(level)));
            synthetic.insert(
                0,
                TextLine::new(text)
                    .with_color(self.config.enchant_line_color)
                    .non_italic(),
            );
        }

        let mut added_flags: Vec<String> = Vec::new();
        if !synthetic.is_empty() {
            for flag in SUPPRESSED_TOOLTIPS {
                if meta.add_flag(flag) {
                    added_flags.push(flag.as_str().to_string());
                }
            }
        }

        let synthetic_text: Vec<String> = synthetic.iter().map(|l| l.text.clone()).collect();
        trace!(
            material = %material_key,
            lines = synthetic_text.len(),
            modified_name,
            "decorated"
        );

        synthetic.extend(rest);
        meta.lore = synthetic;

        meta.data.set(META_NAMESPACE, HAS_MODIFIED_NAME, modified_name);
        meta.data.set(META_NAMESPACE, CREATED_META, created_meta);
        if self.config.write_marker {
            meta.data.set(META_NAMESPACE, DECORATED, true);
            meta.data.set(META_NAMESPACE, SYNTHETIC_LORE, synthetic_text);
            meta.data.set(META_NAMESPACE, HIDDEN_FLAGS, added_flags);
        }
    }

    /// Undo the decoration of an item received from a viewer with `locale`.
    ///
    /// `Ok(None)` means the item needs no reversion and should be used as is.
    pub fn revert(&self, wire: &WireItem, locale: &str) -> Result<Option<ItemStack>> {
        Ok(self.revert_stack(wire.decode()?, locale))
    }

    /// [`ClientView::revert`] on an already decoded stack.
    #[must_use]
    pub fn revert_stack(&self, mut stack: ItemStack, locale: &str) -> Option<ItemStack> {
        if stack.is_empty() || !stack.material.supports_meta {
            return None;
        }

        let material_key = identity::resolve(&stack);
        let meta = stack.meta.as_mut()?;

        if meta.data.get(META_NAMESPACE, DECORATED, false) {
            revert_marked(meta);
        } else if self.looks_decorated(meta, &material_key.to_string()) {
            debug!(material = %material_key, "no decoration marker, reverting by heuristics");
            self.revert_heuristic(meta, locale);
        } else {
            return None;
        }

        let created_meta = meta.data.get(META_NAMESPACE, CREATED_META, false);
        meta.data.remove_namespace(META_NAMESPACE);
        if created_meta && *meta == ItemMeta::default() {
            stack.clear_meta();
        }
        Some(stack)
    }

    fn looks_decorated(&self, meta: &ItemMeta, material_key: &str) -> bool {
        if meta.data.has(META_NAMESPACE, HAS_MODIFIED_NAME) {
            return true;
        }
        if meta
            .display_name
            .as_ref()
            .is_some_and(|name| name.plain() == material_key)
        {
            return true;
        }
        self.ctx.enchantments.values().any(|enchantment| {
            let key = enchantment.key().to_string();
            meta.lore.iter().any(|line| line.starts_with(&key))
        })
    }

    fn revert_heuristic(&self, meta: &mut ItemMeta, locale: &str) {
        if meta.data.get(META_NAMESPACE, HAS_MODIFIED_NAME, false) {
            meta.display_name = None;
        }

        for enchantment in self.ctx.enchantments.values() {
            let name = self.localizer.name_for(locale, ENCHANTMENT_DOMAIN, enchantment.key());
            let prefix = format!("{name} ");
            meta.lore.retain(|line| !line.starts_with(&prefix));
        }

        for flag in SUPPRESSED_TOOLTIPS {
            meta.remove_flag(flag);
        }
    }
}

fn revert_marked(meta: &mut ItemMeta) {
    if meta.data.get(META_NAMESPACE, HAS_MODIFIED_NAME, false) {
        meta.display_name = None;
    }

    let synthetic: Vec<String> = meta.data.get(META_NAMESPACE, SYNTHETIC_LORE, Vec::new());
    for text in &synthetic {
        if let Some(pos) = meta.lore.iter().position(|line| line.plain() == text) {
            meta.lore.remove(pos);
        }
    }

    let hidden: Vec<String> = meta.data.get(META_NAMESPACE, HIDDEN_FLAGS, Vec::new());
    for flag in hidden.iter().filter_map(|name| ItemFlag::parse(name)) {
        meta.remove_flag(flag);
    }
}

impl std::fmt::Debug for ClientView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientView")
            .field("materials", &self.ctx.materials.len())
            .field("enchantments", &self.ctx.enchantments.len())
            .field("config", &self.config)
            .finish()
    }
}
