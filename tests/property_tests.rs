//! Property-based tests.
//!
//! Checks the invariants that must hold for any input: key parsing, identity
//! stamping, attribute storage and the decorate/revert round trip.

use std::sync::Arc;

use proptest::prelude::*;

use voxel_items::attributes::AttributeStore;
use voxel_items::core::NamespacedKey;
use voxel_items::item::{self, ItemInstance};
use voxel_items::platform::{BaseCatalog, ItemStack};
use voxel_items::registry::{roman_numeral, EnchantmentFields, RegistryContext};
use voxel_items::view::{ClientView, IdentifierLocalizer};

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9._-]{1,16}"
}

fn view() -> ClientView {
    let mut ctx = RegistryContext::vanilla();
    ctx.enchantments.register(
        EnchantmentFields::new(NamespacedKey::new("pack", "vein_mining").unwrap()).with_max_level(3),
    );
    ClientView::new(ctx, Arc::new(IdentifierLocalizer))
}

proptest! {
    #[test]
    fn prop_key_display_parses_back(ns in segment(), id in segment()) {
        let key = NamespacedKey::new(ns.as_str(), id.as_str()).unwrap();
        let parsed = NamespacedKey::parse(&key.to_string()).unwrap();
        prop_assert_eq!(parsed, key);
    }

    #[test]
    fn prop_key_rejects_uppercase(ns in "[A-Z]{1,8}", id in segment()) {
        prop_assert!(NamespacedKey::new(ns.as_str(), id.as_str()).is_err());
    }

    #[test]
    fn prop_stamp_then_resolve(ns in segment(), id in segment()) {
        let key = NamespacedKey::new(ns.as_str(), id.as_str()).unwrap();
        let catalog = BaseCatalog::vanilla();
        let mut stack = ItemStack::new(catalog.builtin_material("stone").unwrap().clone());

        item::stamp(&mut stack, &key);
        prop_assert_eq!(item::resolve(&stack), key);
    }

    #[test]
    fn prop_attribute_set_then_get(key in "[a-z]{1,10}", value in any::<i32>(), text in ".{0,20}") {
        let mut store = AttributeStore::new();
        store.set("pack", &key, value);
        store.set("other", &key, text.clone());

        prop_assert_eq!(store.get("pack", &key, 0i32), value);
        prop_assert_eq!(store.get("other", &key, String::new()), text);
        // wrong kind reads the default
        prop_assert_eq!(store.get("pack", &key, String::from("none")), "none");
    }

    #[test]
    fn prop_roman_numeral_sign(n in 1i64..4000) {
        let positive = roman_numeral(n);
        prop_assert!(positive.chars().all(|c| "IVXLCDM".contains(c)));
        prop_assert_eq!(roman_numeral(-n), format!("-{positive}"));
    }

    #[test]
    fn prop_decorate_revert_round_trip(
        lore in prop::collection::vec("[a-z]{1,8}", 0..4),
        name in prop::option::of("[A-Za-z]{1,10}"),
        vein in 0u32..=3,
        efficiency in 0u32..=5,
    ) {
        let view = view();
        let catalog = BaseCatalog::vanilla();
        let mut stack = ItemStack::new(catalog.builtin_material("diamond_pickaxe").unwrap().clone());
        {
            let mut instance = ItemInstance::new(&mut stack);
            for line in &lore {
                instance.add_lore_line(line.as_str()).unwrap();
            }
            if let Some(name) = &name {
                instance.set_display_name(name.as_str()).unwrap();
            }
            if vein > 0 {
                instance.add_enchant(&NamespacedKey::new("pack", "vein_mining").unwrap(), vein).unwrap();
            }
            if efficiency > 0 {
                instance.add_enchant(&NamespacedKey::builtin("efficiency").unwrap(), efficiency).unwrap();
            }
        }

        let wire = view.decorate(&stack, "en_us").unwrap();
        let back = view.revert(&wire, "de_de").unwrap().unwrap();
        prop_assert_eq!(back, stack);
    }
}
