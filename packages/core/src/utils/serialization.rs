// Сериализация session records (bincode)

use crate::error::StoreError;
use serde::{Deserialize, Serialize};

pub fn to_bytes<T: Serialize>(data: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(data).map_err(|e| StoreError(format!("Serialization failed: {}", e)))
}

pub fn from_bytes<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError(format!("Deserialization failed: {}", e)))
}
