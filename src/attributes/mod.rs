//! Attribute system: typed values in namespace-qualified stores.
//!
//! ## Key Types
//!
//! - `AttributeValue`: Closed set of storable kinds
//! - `AttributeKind`: Maps Rust types to exactly one kind
//! - `AttributeStore`: Namespaced key/value storage with default fallback

pub mod store;
pub mod value;

pub use store::{AttributeKey, AttributeStore};
pub use value::{AttributeKind, AttributeValue};
