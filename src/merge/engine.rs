//! Enchantment merging at a crafting/repair station.
//!
//! Two items go in: the *left* item being improved and the *right* item
//! sacrificed for it (the same material, or an enchanted book). One item and a
//! cost come out, or a structured rejection.
//!
//! ## Algorithm
//!
//! 1. **Eligibility**: same resolved material, or the right item is an
//!    enchanted book carrying at least one enchantment applicable to the left
//! 2. **Durability**: same base kind with durability repairs the result by a
//!    bonus percentage of the maximum
//! 3. **Union**: right enchantments not applicable to the left are skipped;
//!    shared ones combine with [`combine_levels`]; new ones are added unless
//!    incompatible (in either direction) with one already present, which
//!    rejects the whole merge
//! 4. **Cost**: durability cost + Σ level × rarity weight + prior work,
//!    floored at the minimum; a rename adds its own cost

use tracing::debug;

use crate::core::{MergeConfig, NamespacedKey, Result};
use crate::item::{identity, read_enchant_level, ItemInstance};
use crate::platform::{ItemCategory, ItemStack};
use crate::registry::{EnchantmentDescriptor, RegistryContext};

/// Why a merge produced no result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeRejection {
    /// The items cannot be combined at all.
    Ineligible,
    /// The right item carries an enchantment that conflicts with one on the result.
    Incompatible {
        enchantment: NamespacedKey,
        conflicts_with: NamespacedKey,
    },
}

impl std::fmt::Display for MergeRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeRejection::Ineligible => f.write_str("items cannot be combined"),
            MergeRejection::Incompatible {
                enchantment,
                conflicts_with,
            } => write!(f, "{enchantment} is incompatible with {conflicts_with}"),
        }
    }
}

/// Result of [`MergeEngine::merge`].
#[derive(Clone, Debug, PartialEq)]
pub enum MergeOutcome {
    Merged { result: ItemStack, cost: u32 },
    Rejected(MergeRejection),
}

impl MergeOutcome {
    #[must_use]
    pub fn is_merged(&self) -> bool {
        matches!(self, MergeOutcome::Merged { .. })
    }

    /// The cost, if merged.
    #[must_use]
    pub fn cost(&self) -> Option<u32> {
        match self {
            MergeOutcome::Merged { cost, .. } => Some(*cost),
            MergeOutcome::Rejected(_) => None,
        }
    }

    /// The resulting item, if merged.
    #[must_use]
    pub fn into_result(self) -> Option<ItemStack> {
        match self {
            MergeOutcome::Merged { result, .. } => Some(result),
            MergeOutcome::Rejected(_) => None,
        }
    }

    /// The rejection, if rejected.
    #[must_use]
    pub fn rejection(&self) -> Option<&MergeRejection> {
        match self {
            MergeOutcome::Merged { .. } => None,
            MergeOutcome::Rejected(reason) => Some(reason),
        }
    }
}

/// Combine two levels of the same enchantment.
///
/// Equal levels step up by one, capped at `max`. Otherwise the higher level
/// wins as is.
///
/// ```
/// use voxel_items::merge::combine_levels;
///
/// assert_eq!(combine_levels(3, 3, 5), 4);
/// assert_eq!(combine_levels(2, 5, 10), 5);
/// assert_eq!(combine_levels(5, 5, 5), 5);
/// ```
#[must_use]
pub fn combine_levels(l1: u32, l2: u32, max: u32) -> u32 {
    if l1 == l2 {
        l1.saturating_add(1).min(max)
    } else {
        l1.max(l2)
    }
}

/// Combines items against a registry context.
#[derive(Debug)]
pub struct MergeEngine<'c> {
    ctx: &'c RegistryContext,
    config: MergeConfig,
}

impl<'c> MergeEngine<'c> {
    #[must_use]
    pub fn new(ctx: &'c RegistryContext) -> Self {
        Self {
            ctx,
            config: MergeConfig::default(),
        }
    }

    /// Set the cost configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    /// Merge `right` into `left`.
    ///
    /// `rename`: `None` keeps the left item's display name, a blank string
    /// clears it, anything else becomes the new name.
    #[must_use]
    pub fn merge(&self, left: &ItemStack, right: &ItemStack, rename: Option<&str>) -> MergeOutcome {
        if !self.is_eligible(left, right) {
            debug!(left = %left.material.key, right = %right.material.key, "merge ineligible");
            return MergeOutcome::Rejected(MergeRejection::Ineligible);
        }

        let mut result = left.clone();
        let same_kind = left.material.key == right.material.key;
        let repairs = same_kind && left.material.is_damageable();
        if repairs {
            let bonus = u32::from(left.material.max_durability) * self.config.repair_bonus_percent / 100;
            let damage = u32::from(left.damage.min(right.damage)).saturating_sub(bonus);
            result.damage = u16::try_from(damage).unwrap_or(u16::MAX);
        }

        match self.union_enchants(&mut result, left, right, rename) {
            Ok(None) => {}
            Ok(Some(rejection)) => {
                debug!(%rejection, "merge rejected");
                return MergeOutcome::Rejected(rejection);
            }
            Err(err) => {
                debug!(%err, "merge result cannot carry enchantments");
                return MergeOutcome::Rejected(MergeRejection::Ineligible);
            }
        }

        let cost = self.cost(&result, left, right, repairs, rename);
        MergeOutcome::Merged { result, cost }
    }

    fn is_eligible(&self, left: &ItemStack, right: &ItemStack) -> bool {
        if left.is_empty() || right.is_empty() || !left.supports_meta() {
            return false;
        }
        if identity::resolve(left) == identity::resolve(right) {
            return true;
        }
        right.material.category == ItemCategory::EnchantedBook && self.book_applies_to(right, left)
    }

    fn book_applies_to(&self, book: &ItemStack, target: &ItemStack) -> bool {
        let Some(meta) = book.meta() else {
            return false;
        };
        self.ctx.enchantments.values().any(|enchantment| {
            read_enchant_level(meta, enchantment.key()) > 0 && enchantment.can_enchant(&target.material)
        })
    }

    fn union_enchants(
        &self,
        result: &mut ItemStack,
        left: &ItemStack,
        right: &ItemStack,
        rename: Option<&str>,
    ) -> Result<Option<MergeRejection>> {
        let mut item = ItemInstance::new(result);

        if let Some(right_meta) = right.meta() {
            for enchantment in self.ctx.enchantments.values() {
                let right_level = read_enchant_level(right_meta, enchantment.key());
                if right_level == 0 || !enchantment.can_enchant(&left.material) {
                    continue;
                }

                let left_level = item.enchant_level(enchantment.key());
                if left_level > 0 {
                    let level = combine_levels(left_level, right_level, enchantment.max_level());
                    item.add_enchant(enchantment.key(), level)?;
                    continue;
                }

                if let Some(conflict) = self.find_conflict(enchantment, &item) {
                    return Ok(Some(MergeRejection::Incompatible {
                        enchantment: enchantment.key().clone(),
                        conflicts_with: conflict,
                    }));
                }
                item.add_enchant(enchantment.key(), right_level)?;
            }
        }

        match rename {
            None => {}
            Some(name) if name.trim().is_empty() => item.clear_display_name()?,
            Some(name) => item.set_display_name(name)?,
        }
        Ok(None)
    }

    /// First enchantment on `item` that conflicts with `enchantment`, checking
    /// both descriptors' declarations.
    fn find_conflict(&self, enchantment: &EnchantmentDescriptor, item: &ItemInstance<'_>) -> Option<NamespacedKey> {
        item.enchants().into_iter().map(|(key, _)| key).find(|present| {
            enchantment.conflicts_with(present)
                || self
                    .ctx
                    .enchantments
                    .get(present)
                    .is_some_and(|other| other.conflicts_with(enchantment.key()))
        })
    }

    fn cost(
        &self,
        result: &ItemStack,
        left: &ItemStack,
        right: &ItemStack,
        repairs: bool,
        rename: Option<&str>,
    ) -> u32 {
        let mut cost: i64 = 0;
        if repairs {
            cost += i64::from(self.config.durability_cost);
        }

        if let Some(meta) = result.meta() {
            for enchantment in self.ctx.enchantments.values() {
                let level = read_enchant_level(meta, enchantment.key());
                cost += i64::from(level) * i64::from(enchantment.rarity_weight());
            }
        }

        cost += i64::from(left.repair_cost.max(right.repair_cost));
        cost = cost.max(i64::from(self.config.min_cost));

        if rename.is_some_and(|name| !name.trim().is_empty()) {
            cost += i64::from(self.config.rename_cost);
        }

        u32::try_from(cost).unwrap_or(u32::MAX)
    }
}
