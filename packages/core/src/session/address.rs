use serde::{Deserialize, Serialize};
use std::fmt;

/// A peer device: the key every session record is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolAddress {
    pub recipient_id: String,
    pub device_id: u32,
}

impl ProtocolAddress {
    pub fn new(recipient_id: impl Into<String>, device_id: u32) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            device_id,
        }
    }
}

impl fmt::Display for ProtocolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.recipient_id, self.device_id)
    }
}
