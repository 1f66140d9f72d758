// In-memory session store для тестов и non-WASM платформ

use crate::error::StoreError;
use crate::session::address::ProtocolAddress;
use crate::session::record::SessionRecord;
use crate::session::store::SessionStore;
use crate::utils::serialization;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

type Records = HashMap<ProtocolAddress, Vec<u8>>;

/// In-memory хранилище session records (bincode сериализация, как на диске)
pub struct MemorySessionStore {
    records: Mutex<Records>,
}

/// Protocol context for [`MemorySessionStore`]: holds the store lock, so every
/// read and write made through it is atomic with respect to other transactions.
pub struct MemoryTransaction<'a> {
    records: MutexGuard<'a, Records>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Opens a transaction. Blocks while another one is alive.
    pub fn begin(&self) -> Result<MemoryTransaction<'_>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError("Session store lock poisoned".to_string()))?;
        Ok(MemoryTransaction { records })
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransaction<'_> {
    pub fn contains_session(&self, address: &ProtocolAddress) -> bool {
        self.records.contains_key(address)
    }

    pub fn delete_session(&mut self, address: &ProtocolAddress) {
        self.records.remove(address);
    }

    pub fn session_count(&self) -> usize {
        self.records.len()
    }
}

impl<'a> SessionStore<MemoryTransaction<'a>> for MemorySessionStore {
    fn load_session(
        &self,
        address: &ProtocolAddress,
        ctx: &mut MemoryTransaction<'a>,
    ) -> Result<SessionRecord, StoreError> {
        match ctx.records.get(address) {
            Some(bytes) => serialization::from_bytes(bytes),
            None => Ok(SessionRecord::new_fresh()),
        }
    }

    fn store_session(
        &self,
        address: &ProtocolAddress,
        record: &SessionRecord,
        ctx: &mut MemoryTransaction<'a>,
    ) -> Result<(), StoreError> {
        let bytes = serialization::to_bytes(record)?;
        trace!(
            target: "storage::memory",
            address = %address,
            states = record.state_count(),
            "Storing session record"
        );
        ctx.records.insert(address.clone(), bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::record::SessionState;

    #[test]
    fn test_missing_record_is_fresh() {
        let store = MemorySessionStore::new();
        let mut txn = store.begin().unwrap();

        let record = store.load_session(&ProtocolAddress::new("alice", 1), &mut txn).unwrap();
        assert!(record.is_fresh());
        assert_eq!(txn.session_count(), 0);
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let store = MemorySessionStore::new();
        let address = ProtocolAddress::new("alice", 1);

        let mut record = SessionRecord::new(SessionState::new(vec![1; 33], vec![1]));
        record.promote(SessionState::new(vec![2; 33], vec![2]));

        {
            let mut txn = store.begin().unwrap();
            store.store_session(&address, &record, &mut txn).unwrap();
        }

        let mut txn = store.begin().unwrap();
        assert!(txn.contains_session(&address));
        assert_eq!(store.load_session(&address, &mut txn).unwrap(), record);

        // другой device id — другая запись
        let other = ProtocolAddress::new("alice", 2);
        assert!(store.load_session(&other, &mut txn).unwrap().is_fresh());
    }

    #[test]
    fn test_delete_session() {
        let store = MemorySessionStore::new();
        let address = ProtocolAddress::new("bob", 1);
        let mut txn = store.begin().unwrap();

        let record = SessionRecord::new(SessionState::new(vec![3; 33], vec![]));
        store.store_session(&address, &record, &mut txn).unwrap();
        txn.delete_session(&address);

        assert!(store.load_session(&address, &mut txn).unwrap().is_fresh());
    }
}
