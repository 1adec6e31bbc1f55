//! What clients see.
//!
//! ## Key Types
//!
//! - `Localizer`: Display names per viewer locale
//! - `TranslationTable`: JSON-fed `Localizer`
//! - `ClientView`: Decorates outgoing items, reverts incoming ones

pub mod locale;
pub mod transform;

pub use locale::{
    normalize_locale, translation_key, IdentifierLocalizer, Localizer, TranslationTable,
    ENCHANTMENT_DOMAIN, ITEM_DOMAIN,
};
pub use transform::ClientView;
