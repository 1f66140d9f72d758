use thiserror::Error;

/// Errors raised by the low-level primitives behind [`crate::crypto::CryptoProvider`].
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Failed to generate keys: {0}")]
    KeyGenerationError(String),
    #[error("Signing failed: {0}")]
    SigningError(String),
    #[error("Signature verification failed: {0}")]
    SignatureVerificationError(String),
    #[error("Key agreement failed: {0}")]
    KeyAgreementError(String),
    #[error("AEAD encryption failed: {0}")]
    AeadEncryptionError(String),
    #[error("AEAD decryption failed: {0}")]
    AeadDecryptionError(String),
    #[error("Invalid input: {0}")]
    InvalidInputError(String),
}

impl From<ed25519_dalek::SignatureError> for CryptoError {
    fn from(err: ed25519_dalek::SignatureError) -> Self {
        CryptoError::SigningError(err.to_string())
    }
}

/// A sender or server certificate was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    #[error("Invalid certificate: missing field {0}")]
    MissingField(&'static str),
    #[error("Invalid certificate: signature verification failed: {0}")]
    SignatureVerificationFailed(String),
    #[error("Invalid certificate: revoked key id {0}")]
    Revoked(u32),
}

/// The underlying ratchet cipher could not decrypt a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    #[error("No session for {0}")]
    NoSession(String),
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
    #[error("Duplicate message: {0}")]
    DuplicateMessage(String),
    #[error("Decryption failed: {0}")]
    Other(String),
}

/// The underlying ratchet cipher could not encrypt a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Encryption failed: {0}")]
pub struct EncryptError(pub String);

/// Session store access failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Storage error: {0}")]
pub struct StoreError(pub String);

/// An unsolicited pre-key message was not a legitimate reset or friend request accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Session reset verification failed: {0}")]
pub struct ResetVerificationError(pub String);

/// Errors surfaced by [`crate::session::SessionReconciler`].
#[derive(Error, Debug)]
pub enum SessionCipherError {
    #[error(transparent)]
    ResetVerification(#[from] ResetVerificationError),

    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    #[error(transparent)]
    Encrypt(#[from] EncryptError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SessionCipherError>;
