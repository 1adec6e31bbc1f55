//! Network-facing item payloads.

use serde::{Deserialize, Serialize};

use super::stack::ItemStack;
use crate::core::Result;

/// Opaque serialized item as sent to (or received from) a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireItem {
    bytes: Vec<u8>,
}

impl WireItem {
    /// Wrap bytes received from the network.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw bytes for sending.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Serialize a stack. Only the view transform produces outgoing items.
    pub(crate) fn encode(stack: &ItemStack) -> Result<Self> {
        Ok(Self {
            bytes: bincode::serialize(stack)?,
        })
    }

    /// Decode back into a stack.
    pub fn decode(&self) -> Result<ItemStack> {
        Ok(bincode::deserialize(&self.bytes)?)
    }
}
