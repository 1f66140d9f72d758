use serde::{Deserialize, Serialize};

/// Wire type of an inbound protocol message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum CipherMessageType {
    /// Ordinary message on an existing session
    Whisper = 1,
    /// Carries a pre-key bundle and can open a brand-new session
    PreKey = 3,
    FriendRequest = 101,
}

/// An inbound message exactly as the underlying cipher will consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherMessage {
    pub message_type: CipherMessageType,
    pub serialized: Vec<u8>,
}

impl CipherMessage {
    pub fn new(message_type: CipherMessageType, serialized: Vec<u8>) -> Self {
        Self {
            message_type,
            serialized,
        }
    }

    pub fn is_pre_key(&self) -> bool {
        self.message_type == CipherMessageType::PreKey
    }
}
