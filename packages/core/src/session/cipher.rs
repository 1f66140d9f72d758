use crate::error::{DecryptError, EncryptError};
use crate::session::address::ProtocolAddress;
use crate::session::message::CipherMessage;

/// The ratchet engine the reconciler wraps.
///
/// A successful `decrypt` may advance the ratchet, promote a new state to
/// current and archive the old one, all through the session store under `ctx`.
/// A failed `decrypt` must leave the record untouched.
pub trait SessionCipher<C> {
    fn decrypt(
        &self,
        address: &ProtocolAddress,
        message: &CipherMessage,
        ctx: &mut C,
    ) -> Result<Vec<u8>, DecryptError>;

    fn encrypt(
        &self,
        address: &ProtocolAddress,
        plaintext: &[u8],
        ctx: &mut C,
    ) -> Result<CipherMessage, EncryptError>;
}

impl<C, T: SessionCipher<C> + ?Sized> SessionCipher<C> for &T {
    fn decrypt(
        &self,
        address: &ProtocolAddress,
        message: &CipherMessage,
        ctx: &mut C,
    ) -> Result<Vec<u8>, DecryptError> {
        (**self).decrypt(address, message, ctx)
    }

    fn encrypt(
        &self,
        address: &ProtocolAddress,
        plaintext: &[u8],
        ctx: &mut C,
    ) -> Result<CipherMessage, EncryptError> {
        (**self).encrypt(address, plaintext, ctx)
    }
}
