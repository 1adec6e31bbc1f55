//! Client view integration tests.
//!
//! These tests run items through decorate and revert the way the network
//! layer does: encode for a viewer, decode what comes back.

use std::sync::Arc;

use voxel_items::core::{NamespacedKey, ViewConfig};
use voxel_items::item::{self, ItemInstance, META_NAMESPACE};
use voxel_items::platform::{ItemFlag, ItemStack, TextLine, WireItem};
use voxel_items::registry::{EnchantmentFields, MaterialFields, Rarity, RegistryContext};
use voxel_items::view::{ClientView, TranslationTable};

const EN_US: &str = r#"{
    "item.pack.ruby_ore": "Ruby Ore",
    "enchantment.pack.vein_mining": "Vein Mining",
    "enchantment.minecraft.efficiency": "Efficiency"
}"#;

const DE_DE: &str = r#"{
    "item.pack.ruby_ore": "Rubinerz",
    "enchantment.pack.vein_mining": "Aderabbau"
}"#;

fn key(s: &str) -> NamespacedKey {
    NamespacedKey::parse(s).unwrap()
}

fn setup() -> (RegistryContext, ClientView) {
    let mut ctx = RegistryContext::vanilla();
    let stone = ctx.catalog().builtin_material("stone").unwrap().clone();
    ctx.materials
        .register(MaterialFields::new(key("pack:ruby_ore"), stone).with_rarity(Rarity::Rare));
    ctx.enchantments
        .register(EnchantmentFields::new(key("pack:vein_mining")).with_max_level(3));

    let mut table = TranslationTable::new().with_fallback_locale("en_us");
    table.load_json("en_us", EN_US).unwrap();
    table.load_json("de-DE", DE_DE).unwrap();

    let view = ClientView::new(ctx.snapshot(), Arc::new(table));
    (ctx, view)
}

fn ruby_ore(ctx: &RegistryContext) -> ItemStack {
    let ruby = ctx.materials.get(&key("pack:ruby_ore")).unwrap();
    let mut stack = ItemStack::new(ruby.base().clone());
    ItemInstance::new(&mut stack).set_material(ruby).unwrap();
    stack
}

fn pickaxe(ctx: &RegistryContext) -> ItemStack {
    ItemStack::new(ctx.catalog().builtin_material("diamond_pickaxe").unwrap().clone())
}

fn lore_text(stack: &ItemStack) -> Vec<String> {
    stack
        .meta()
        .map(|meta| meta.lore.iter().map(|l| l.plain().to_string()).collect())
        .unwrap_or_default()
}

/// Scenario: ruby ore gets a localized name and no lore; revert clears the name.
#[test]
fn test_ruby_ore_scenario() {
    let (ctx, view) = setup();
    let stack = ruby_ore(&ctx);

    let wire = view.decorate(&stack, "en_us").unwrap();
    let seen = wire.decode().unwrap();
    let name = seen.meta().unwrap().display_name.clone().unwrap();
    assert_eq!(name.plain(), "Ruby Ore");
    assert_eq!(name.color, Some(0x55FFFF));
    assert!(lore_text(&seen).is_empty());
    assert_eq!(item::resolve(&seen), key("pack:ruby_ore"));

    let back = view.revert(&wire, "en_us").unwrap().unwrap();
    assert!(back.meta().map_or(true, |meta| meta.display_name.is_none()));
    assert_eq!(back, stack);
}

/// The viewer's locale picks the name; unknown locales use the fallback.
#[test]
fn test_locale_selection() {
    let (ctx, view) = setup();
    let stack = ruby_ore(&ctx);

    let german = view.decorated(&stack, "de_DE");
    assert_eq!(german.meta().unwrap().display_name.as_ref().unwrap().plain(), "Rubinerz");

    let french = view.decorated(&stack, "fr_fr");
    assert_eq!(french.meta().unwrap().display_name.as_ref().unwrap().plain(), "Ruby Ore");
}

/// Scenario: vein mining level 3 renders as exactly one line.
#[test]
fn test_vein_mining_scenario() {
    let (ctx, view) = setup();
    let mut stack = pickaxe(&ctx);
    ItemInstance::new(&mut stack)
        .add_enchant(&key("pack:vein_mining"), 3)
        .unwrap();

    let seen = view.decorated(&stack, "en_us");
    assert_eq!(lore_text(&seen), ["Vein Mining III"]);

    let line = &seen.meta().unwrap().lore[0];
    assert_eq!(line.color, Some(0xAAAAAA));
    assert_eq!(line.italic, Some(false));

    let mut instance = ItemInstance::new(&mut stack);
    instance.remove_enchant(&key("pack:vein_mining")).unwrap();
    assert!(!instance.has_enchant(&key("pack:vein_mining")));
    assert_eq!(instance.enchant_level(&key("pack:vein_mining")), 0);

    let seen = view.decorated(&stack, "en_us");
    assert!(lore_text(&seen).is_empty());
}

/// Lines follow registration order top to bottom, above existing lore.
#[test]
fn test_line_order_and_flags() {
    let (ctx, view) = setup();
    let mut stack = pickaxe(&ctx);
    {
        let mut instance = ItemInstance::new(&mut stack);
        instance.add_lore_line("Forged in the deep").unwrap();
        instance.add_enchant(&key("pack:vein_mining"), 1).unwrap();
        instance.add_enchant(&key("minecraft:efficiency"), 5).unwrap();
    }

    let seen = view.decorated(&stack, "en_us");
    assert_eq!(
        lore_text(&seen),
        ["Efficiency V", "Vein Mining I", "Forged in the deep"]
    );

    let meta = seen.meta().unwrap();
    for flag in [ItemFlag::HideEnchants, ItemFlag::HideStoredEnchants, ItemFlag::HideAttributes] {
        assert!(meta.has_flag(flag));
    }
}

/// Without enchantment lines no tooltip is suppressed.
#[test]
fn test_no_flags_without_lines() {
    let (ctx, view) = setup();
    let seen = view.decorated(&ruby_ore(&ctx), "en_us");
    assert!(seen.meta().unwrap().flags.is_empty());
}

/// The stored item is never touched by decoration.
#[test]
fn test_decorate_leaves_source_untouched() {
    let (ctx, view) = setup();
    let mut stack = pickaxe(&ctx);
    ItemInstance::new(&mut stack)
        .add_enchant(&key("pack:vein_mining"), 2)
        .unwrap();
    let before = stack.clone();

    let _ = view.decorate(&stack, "en_us").unwrap();
    assert_eq!(stack, before);
}

/// A decorated item revisiting the client keeps one copy of each line and
/// still reverts to the stored item.
#[test]
fn test_double_decoration_is_stable() {
    let (ctx, view) = setup();
    let mut stack = pickaxe(&ctx);
    ItemInstance::new(&mut stack)
        .add_enchant(&key("pack:vein_mining"), 2)
        .unwrap();

    let once = view.decorated(&stack, "en_us");
    let twice = view.decorated(&once, "en_us");
    assert_eq!(lore_text(&twice), ["Vein Mining II"]);
    assert_eq!(view.revert_stack(twice, "en_us").unwrap(), stack);

    // an item that never had metadata comes back without any
    let plain = pickaxe(&ctx);
    let twice = view.decorated(&view.decorated(&plain, "en_us"), "de_de");
    let back = view.revert_stack(twice, "en_us").unwrap();
    assert!(back.meta().is_none());
    assert_eq!(back, plain);
}

/// Round trip with a locale switch in between.
#[test]
fn test_round_trip_locale_switch() {
    let (ctx, view) = setup();
    let mut stack = ruby_ore(&ctx);
    {
        let mut instance = ItemInstance::new(&mut stack);
        instance.add_enchant(&key("pack:vein_mining"), 2).unwrap();
        instance.add_lore_line(TextLine::new("Signed").with_color(0x00FF00)).unwrap();
    }

    let wire = view.decorate(&stack, "de_de").unwrap();
    let back = view.revert(&wire, "en_us").unwrap().unwrap();
    assert_eq!(back, stack);
}

/// Marker-less decoration still reverts by heuristics.
#[test]
fn test_heuristic_round_trip() {
    let (ctx, view) = setup();
    let view = view.with_config(ViewConfig::default().without_marker());
    let mut stack = pickaxe(&ctx);
    ItemInstance::new(&mut stack)
        .add_enchant(&key("pack:vein_mining"), 2)
        .unwrap();

    let wire = view.decorate(&stack, "en_us").unwrap();
    let back = view.revert(&wire, "en_us").unwrap().unwrap();

    let meta = back.meta().unwrap();
    assert!(meta.display_name.is_none());
    assert!(meta.lore.is_empty());
    assert!(meta.flags.is_empty());
    assert_eq!(meta.data.iter_namespace(META_NAMESPACE).count(), 0);
}

/// Never-decorated items come back as "no reversion needed".
#[test]
fn test_revert_of_plain_item() {
    let (ctx, view) = setup();
    let mut stack = pickaxe(&ctx);
    ItemInstance::new(&mut stack)
        .set_display_name("My Pick")
        .unwrap();

    let wire = WireItem::from_bytes(bincode::serialize(&stack).unwrap());
    assert!(view.revert(&wire, "en_us").unwrap().is_none());
    assert!(view.revert_stack(stack, "en_us").is_none());
}

/// Garbage from the network is a codec error, not a panic.
#[test]
fn test_revert_of_garbage() {
    let (_, view) = setup();
    let wire = WireItem::from_bytes(vec![0xde, 0xad]);
    assert!(view.revert(&wire, "en_us").is_err());
}
