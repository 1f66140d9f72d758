use crate::error::StoreError;
use crate::session::address::ProtocolAddress;
use crate::session::record::SessionRecord;

/// Persistent session records, keyed by peer device.
///
/// `C` is the protocol context: the transaction handle every read and write of
/// one decrypt must go through. Implementations return a fresh record when
/// nothing is stored for `address`.
pub trait SessionStore<C> {
    fn load_session(&self, address: &ProtocolAddress, ctx: &mut C) -> Result<SessionRecord, StoreError>;

    fn store_session(
        &self,
        address: &ProtocolAddress,
        record: &SessionRecord,
        ctx: &mut C,
    ) -> Result<(), StoreError>;
}

impl<C, T: SessionStore<C> + ?Sized> SessionStore<C> for &T {
    fn load_session(&self, address: &ProtocolAddress, ctx: &mut C) -> Result<SessionRecord, StoreError> {
        (**self).load_session(address, ctx)
    }

    fn store_session(
        &self,
        address: &ProtocolAddress,
        record: &SessionRecord,
        ctx: &mut C,
    ) -> Result<(), StoreError> {
        (**self).store_session(address, record, ctx)
    }
}
