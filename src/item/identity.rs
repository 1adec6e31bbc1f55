//! Item identity.
//!
//! Which material descriptor an item represents is written into the stack's
//! model-hint channel as the canonical key string. Clients ignore hints they
//! do not know, so the identity survives the round trip through an
//! unmodified client.

use crate::core::NamespacedKey;
use crate::platform::ItemStack;

/// Record `key` as the item's identity, replacing any previous hints.
pub fn stamp(stack: &mut ItemStack, key: &NamespacedKey) {
    stack.set_model_hints(vec![key.to_string()]);
}

/// Read the item's identity.
///
/// Falls back to the intrinsic base-material key when no hint is present or
/// the first hint does not parse as a key.
#[must_use]
pub fn resolve(stack: &ItemStack) -> NamespacedKey {
    stack
        .model_hints()
        .first()
        .and_then(|hint| NamespacedKey::parse(hint).ok())
        .unwrap_or_else(|| stack.material.key.clone())
}

/// Does the item carry an explicit identity hint?
#[must_use]
pub fn is_stamped(stack: &ItemStack) -> bool {
    stack
        .model_hints()
        .first()
        .is_some_and(|hint| NamespacedKey::parse(hint).is_ok())
}
