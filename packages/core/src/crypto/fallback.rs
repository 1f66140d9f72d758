//! Fallback session cipher
//!
//! Шифрование "точка-точка" на статическом DH ключе, без ratchet.
//! Используется только для первого сообщения, пока полноценная сессия ещё не
//! установлена: forward secrecy меняется на доступность. После установки
//! ratchet сессии этот путь использовать нельзя.
//!
//! ## Wire format
//!
//! ```text
//! [ nonce (FALLBACK_IV_LENGTH bytes) ][ AEAD ciphertext || tag ]
//! ```
//!
//! Без префикса длины: получатель знает размер nonce заранее.

use crate::config::Config;
use crate::crypto::provider::CryptoProvider;
use crate::crypto::suites::classic::ClassicSuiteProvider;
use crate::error::CryptoError;
use once_cell::sync::OnceCell;
use std::marker::PhantomData;
use tracing::warn;
use zeroize::Zeroizing;

/// Size of the random nonce prepended to every fallback ciphertext.
pub const FALLBACK_IV_LENGTH: usize = 12;

/// Opportunistic cipher keyed by a static X25519 agreement with the recipient.
///
/// Every failure is swallowed into `None`: callers only learn that the path is
/// unavailable, never why.
pub struct FallbackSessionCipher<P: CryptoProvider = ClassicSuiteProvider> {
    /// Hex encoded public key of the recipient, possibly with a key type marker.
    recipient_public_key: String,
    private_key: Option<Zeroizing<Vec<u8>>>,
    symmetric_key: OnceCell<Option<Zeroizing<Vec<u8>>>>,
    _provider: PhantomData<P>,
}

impl<P: CryptoProvider> FallbackSessionCipher<P> {
    pub fn new(recipient_public_key: &str, private_key: Option<Vec<u8>>) -> Self {
        Self {
            recipient_public_key: recipient_public_key.to_string(),
            private_key: private_key.map(Zeroizing::new),
            symmetric_key: OnceCell::new(),
            _provider: PhantomData,
        }
    }

    /// Decodes the recipient key, stripping the one byte type marker if present.
    fn recipient_key_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        let cfg = Config::global();
        let mut encoded = self.recipient_public_key.as_str();
        if encoded.len() == cfg.prefixed_public_key_hex_length
            && encoded.starts_with(cfg.key_type_marker)
        {
            encoded = &encoded[cfg.key_type_marker.len()..];
        }

        let bytes = hex::decode(encoded)
            .map_err(|e| CryptoError::InvalidInputError(format!("Invalid recipient public key: {}", e)))?;
        if bytes.len() != cfg.public_key_size {
            return Err(CryptoError::InvalidInputError(format!(
                "Recipient public key must be {} bytes, got {}",
                cfg.public_key_size,
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    fn symmetric_key(&self) -> Option<&[u8]> {
        self.symmetric_key
            .get_or_init(|| {
                let private_key = self.private_key.as_ref()?;
                let derived = self.recipient_key_bytes().and_then(|public_key| {
                    P::agree(
                        &P::agreement_private_key_from_bytes(private_key.to_vec()),
                        &P::agreement_public_key_from_bytes(public_key),
                    )
                });
                match derived {
                    Ok(secret) if secret.len() == P::aead_key_length() => Some(Zeroizing::new(secret)),
                    Ok(secret) => {
                        warn!(
                            target: "crypto::fallback",
                            len = secret.len(),
                            "Shared secret has unexpected length"
                        );
                        None
                    }
                    Err(e) => {
                        warn!(target: "crypto::fallback", error = %e, "Couldn't derive fallback symmetric key");
                        None
                    }
                }
            })
            .as_deref()
            .map(|key| key.as_slice())
    }

    /// Whether a symmetric key could be derived for this recipient.
    pub fn is_available(&self) -> bool {
        self.symmetric_key().is_some()
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Option<Vec<u8>> {
        let key = self.symmetric_key()?;
        let sealed = P::generate_nonce(FALLBACK_IV_LENGTH).and_then(|nonce| {
            let ciphertext = P::aead_encrypt(key, &nonce, plaintext, None)?;
            let mut blob = nonce;
            blob.extend_from_slice(&ciphertext);
            Ok(blob)
        });

        match sealed {
            Ok(blob) => Some(blob),
            Err(e) => {
                warn!(
                    target: "crypto::fallback",
                    error = %e,
                    "Couldn't encrypt message using fallback session cipher"
                );
                None
            }
        }
    }

    pub fn decrypt(&self, iv_and_ciphertext: &[u8]) -> Option<Vec<u8>> {
        let key = self.symmetric_key()?;
        if iv_and_ciphertext.len() < FALLBACK_IV_LENGTH {
            warn!(
                target: "crypto::fallback",
                len = iv_and_ciphertext.len(),
                "Fallback ciphertext is shorter than its nonce"
            );
            return None;
        }

        let (nonce, ciphertext) = iv_and_ciphertext.split_at(FALLBACK_IV_LENGTH);
        match P::aead_decrypt(key, nonce, ciphertext, None) {
            Ok(plaintext) => Some(plaintext),
            Err(e) => {
                warn!(
                    target: "crypto::fallback",
                    error = %e,
                    "Couldn't decrypt message using fallback session cipher"
                );
                None
            }
        }
    }
}
