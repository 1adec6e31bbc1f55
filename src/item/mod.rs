//! Per-item identity and editing.
//!
//! ## Key Types
//!
//! - `identity::{stamp, resolve}`: Which material an item represents
//! - `ItemInstance`: Mutable façade over one `ItemStack`

pub mod identity;
pub mod instance;

pub use identity::{resolve, stamp};
pub use instance::{
    enchant_attribute_key, read_enchant_level, ItemInstance, ENCHANT_NAMESPACE, MAX_BOOK_LEVEL, META_NAMESPACE,
};
