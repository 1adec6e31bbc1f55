//! Repair station integration tests.
//!
//! These tests merge items the way a crafting station does: a left item, a
//! sacrificed right item and an optional rename.

use voxel_items::core::{MergeConfig, NamespacedKey};
use voxel_items::item::ItemInstance;
use voxel_items::merge::{combine_levels, MergeEngine, MergeOutcome, MergeRejection};
use voxel_items::platform::ItemStack;
use voxel_items::registry::{EnchantmentFields, EnchantmentTarget, RegistryContext};

fn key(s: &str) -> NamespacedKey {
    NamespacedKey::parse(s).unwrap()
}

/// Two custom sword enchantments that refuse to share an item.
fn setup() -> RegistryContext {
    let mut ctx = RegistryContext::vanilla();
    ctx.enchantments.register(
        EnchantmentFields::new(key("pack:frost_edge"))
            .with_max_level(3)
            .with_rarity_weight(2)
            .with_target(EnchantmentTarget::Weapon)
            .incompatible_with(&key("pack:flame_edge")),
    );
    ctx.enchantments.register(
        EnchantmentFields::new(key("pack:flame_edge"))
            .with_max_level(3)
            .with_rarity_weight(2)
            .with_target(EnchantmentTarget::Weapon)
            .incompatible_with(&key("pack:frost_edge")),
    );
    ctx.enchantments.register(
        EnchantmentFields::new(key("pack:vein_mining"))
            .with_max_level(3)
            .with_target(EnchantmentTarget::Tool),
    );
    ctx
}

fn stack(ctx: &RegistryContext, id: &str) -> ItemStack {
    ItemStack::new(ctx.catalog().builtin_material(id).unwrap().clone())
}

fn enchanted(ctx: &RegistryContext, id: &str, enchants: &[(&str, u32)]) -> ItemStack {
    let mut stack = stack(ctx, id);
    let mut item = ItemInstance::new(&mut stack);
    for (k, level) in enchants {
        item.add_enchant(&key(k), *level).unwrap();
    }
    stack
}

fn level_of(stack: &ItemStack, k: &str) -> u32 {
    let mut copy = stack.clone();
    ItemInstance::new(&mut copy).enchant_level(&key(k))
}

/// Level combination examples.
#[test]
fn test_combine_examples() {
    assert_eq!(combine_levels(3, 3, 5), 4);
    assert_eq!(combine_levels(2, 5, 10), 5);
    assert_eq!(combine_levels(5, 5, 5), 5);
}

/// Scenario: a book with B onto a sword with A, A and B incompatible.
#[test]
fn test_incompatible_book_rejected() {
    let ctx = setup();
    let sword = enchanted(&ctx, "diamond_sword", &[("pack:frost_edge", 1)]);
    let book = ItemInstance::enchanted_book(ctx.catalog(), &key("pack:flame_edge"), 1).unwrap();

    let outcome = MergeEngine::new(&ctx).merge(&sword, &book, None);
    match outcome {
        MergeOutcome::Rejected(MergeRejection::Incompatible {
            enchantment,
            conflicts_with,
        }) => {
            assert_eq!(enchantment, key("pack:flame_edge"));
            assert_eq!(conflicts_with, key("pack:frost_edge"));
        }
        other => panic!("expected incompatibility, got {other:?}"),
    }
}

/// A book with one compatible enchantment merges and stacks the cost.
#[test]
fn test_book_onto_sword() {
    let ctx = setup();
    let sword = enchanted(&ctx, "diamond_sword", &[("pack:frost_edge", 2)]);
    let book = enchanted(
        &ctx,
        "enchanted_book",
        &[("pack:frost_edge", 2), ("minecraft:sharpness", 1)],
    );

    let outcome = MergeEngine::new(&ctx).merge(&sword, &book, None);
    let cost = outcome.cost().unwrap();
    let result = outcome.into_result().unwrap();

    assert_eq!(level_of(&result, "pack:frost_edge"), 3);
    assert_eq!(level_of(&result, "minecraft:sharpness"), 1);
    // 3 × 2 + 1 × 1, no durability cost since the kinds differ
    assert_eq!(cost, 7);
    assert_eq!(result.material.key, key("minecraft:diamond_sword"));
}

/// Inputs are never mutated.
#[test]
fn test_inputs_untouched() {
    let ctx = setup();
    let left = enchanted(&ctx, "diamond_pickaxe", &[("pack:vein_mining", 1)]).with_damage(300);
    let right = enchanted(&ctx, "diamond_pickaxe", &[("pack:vein_mining", 1)]).with_damage(100);
    let (left_before, right_before) = (left.clone(), right.clone());

    let outcome = MergeEngine::new(&ctx).merge(&left, &right, Some("Twin"));
    assert!(outcome.is_merged());
    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
}

/// Repair plus a merged custom enchantment on tools of the same kind.
#[test]
fn test_repair_and_combine() {
    let ctx = setup();
    let left = enchanted(&ctx, "diamond_pickaxe", &[("pack:vein_mining", 3)]).with_damage(1000);
    let right = enchanted(&ctx, "diamond_pickaxe", &[("pack:vein_mining", 3)]).with_damage(400);

    let outcome = MergeEngine::new(&ctx).merge(&left, &right, None);
    let result = outcome.into_result().unwrap();

    // 400 - floor(1561 × 12 / 100) = 400 - 187
    assert_eq!(result.damage, 213);
    // already at max level
    assert_eq!(level_of(&result, "pack:vein_mining"), 3);
}

/// Books of different enchantments are ineligible unless one applies.
#[test]
fn test_tool_book_on_sword_ineligible() {
    let ctx = setup();
    let sword = stack(&ctx, "diamond_sword");
    let book = ItemInstance::enchanted_book(ctx.catalog(), &key("pack:vein_mining"), 2).unwrap();

    let outcome = MergeEngine::new(&ctx).merge(&sword, &book, None);
    assert_eq!(outcome.rejection(), Some(&MergeRejection::Ineligible));
    assert_eq!(
        outcome.rejection().unwrap().to_string(),
        "items cannot be combined"
    );
}

/// Cost settings come from configuration.
#[test]
fn test_config_rename_cost() {
    let ctx = setup();
    let config = MergeConfig {
        rename_cost: 5,
        min_cost: 0,
        ..MergeConfig::default()
    };
    let left = stack(&ctx, "stone");
    let right = stack(&ctx, "stone");

    let engine = MergeEngine::new(&ctx).with_config(config);
    assert_eq!(engine.merge(&left, &right, None).cost(), Some(0));
    assert_eq!(engine.merge(&left, &right, Some("Pebble")).cost(), Some(5));
}
