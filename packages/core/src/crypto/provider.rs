//! Defines the CryptoProvider trait for crypto-agility.
//!
//! The session lifecycle layer never calls a primitive directly: key agreement,
//! signatures and authenticated encryption are reached through this trait so that
//! a different suite can be slotted in without touching the callers.

use crate::error::CryptoError;
use core::fmt::Debug;

/// Trait that formalizes the primitives used by the fallback cipher and the
/// certificate validator.
pub trait CryptoProvider: Send + Sync + 'static {
    type AgreementPublicKey: AsRef<[u8]> + Debug + Clone + 'static;
    type AgreementPrivateKey: AsRef<[u8]> + Debug + Clone + 'static;
    type SignaturePublicKey: AsRef<[u8]> + Debug + Clone + 'static;
    type SignaturePrivateKey: AsRef<[u8]> + Debug + Clone + 'static;

    /// Generates a new key agreement pair.
    fn generate_key_agreement_keys(
    ) -> Result<(Self::AgreementPrivateKey, Self::AgreementPublicKey), CryptoError>;

    /// Derives the key agreement public key from a private key.
    fn public_key_from_private(
        private_key: &Self::AgreementPrivateKey,
    ) -> Result<Self::AgreementPublicKey, CryptoError>;

    fn agreement_public_key_from_bytes(bytes: Vec<u8>) -> Self::AgreementPublicKey;

    fn agreement_private_key_from_bytes(bytes: Vec<u8>) -> Self::AgreementPrivateKey;

    fn signature_public_key_from_bytes(bytes: Vec<u8>) -> Self::SignaturePublicKey;

    /// Computes the static Diffie-Hellman shared secret.
    fn agree(
        private_key: &Self::AgreementPrivateKey,
        public_key: &Self::AgreementPublicKey,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Generates a new Signature key pair.
    fn generate_signature_keys(
    ) -> Result<(Self::SignaturePrivateKey, Self::SignaturePublicKey), CryptoError>;

    /// Signs a message with the given private key.
    fn sign(private_key: &Self::SignaturePrivateKey, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Verifies a signature with the given public key.
    fn verify(
        public_key: &Self::SignaturePublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError>;

    /// Performs AEAD encryption.
    /// `key`: The symmetric encryption key.
    /// `nonce`: The unique nonce for this encryption.
    /// `plaintext`: The data to encrypt.
    /// `associated_data`: Optional associated data (authenticated but not encrypted).
    fn aead_encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Performs AEAD decryption.
    fn aead_decrypt(
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Length of the AEAD key in bytes.
    fn aead_key_length() -> usize;

    /// Length of the AEAD nonce in bytes.
    fn aead_nonce_length() -> usize;

    /// Generates a cryptographically secure random nonce of a specified length.
    fn generate_nonce(len: usize) -> Result<Vec<u8>, CryptoError>;

    /// Returns the SuiteID associated with this CryptoProvider.
    fn suite_id() -> u16;
}
