//! Attribute values.
//!
//! Attributes are stored as a closed set of tagged values. Typed access goes
//! through [`AttributeKind`], which maps a Rust type onto exactly one variant.
//! Reading with the wrong kind yields `None`, never a conversion.
//!
//! ## AttributeValue Types
//!
//! - `Text`: Strings (target names, recorded lore)
//! - `Byte`: 1-byte flags (booleans are stored as 0/1)
//! - `Int` / `Long`: 32/64-bit integers (levels, weights)
//! - `Float` / `Double`: Floating point (hardness, speed)
//! - `Bytes`, `IntList`, `LongList`: Raw sequences
//! - `TextList`: String lists (incompatible enchantment keys)

use serde::{Deserialize, Serialize};

/// Value for an attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Text(String),
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    IntList(Vec<i32>),
    LongList(Vec<i64>),
    TextList(Vec<String>),
}

impl AttributeValue {
    /// Short name of the stored kind, as it appears in log fields.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Byte(_) => "byte",
            AttributeValue::Int(_) => "int",
            AttributeValue::Long(_) => "long",
            AttributeValue::Float(_) => "float",
            AttributeValue::Double(_) => "double",
            AttributeValue::Bytes(_) => "bytes",
            AttributeValue::IntList(_) => "int_list",
            AttributeValue::LongList(_) => "long_list",
            AttributeValue::TextList(_) => "text_list",
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as int if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Byte flag.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Byte(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Get as text list reference if this is a TextList value.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

/// A Rust type that maps onto one attribute variant.
pub trait AttributeKind: Sized {
    /// Extract from a stored value; `None` on kind mismatch.
    fn from_value(value: &AttributeValue) -> Option<Self>;

    /// Wrap into the matching variant.
    fn into_value(self) -> AttributeValue;
}

macro_rules! attribute_kind {
    ($ty:ty, $variant:ident) => {
        impl AttributeKind for $ty {
            fn from_value(value: &AttributeValue) -> Option<Self> {
                match value {
                    AttributeValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_value(self) -> AttributeValue {
                AttributeValue::$variant(self)
            }
        }

        impl From<$ty> for AttributeValue {
            fn from(v: $ty) -> Self {
                AttributeValue::$variant(v)
            }
        }
    };
}

attribute_kind!(String, Text);
attribute_kind!(i8, Byte);
attribute_kind!(i32, Int);
attribute_kind!(i64, Long);
attribute_kind!(f32, Float);
attribute_kind!(f64, Double);
attribute_kind!(Vec<u8>, Bytes);
attribute_kind!(Vec<i32>, IntList);
attribute_kind!(Vec<i64>, LongList);
attribute_kind!(Vec<String>, TextList);

impl AttributeKind for bool {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        value.as_bool()
    }

    fn into_value(self) -> AttributeValue {
        AttributeValue::Byte(i8::from(self))
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        v.into_value()
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}
