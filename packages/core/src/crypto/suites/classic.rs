use crate::crypto::provider::CryptoProvider;
use crate::error::CryptoError;
use chacha20poly1305::{
    aead::{Aead, Payload},
    ChaCha20Poly1305, Key as AeadKeyChacha, KeyInit, Nonce,
};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand_core::RngCore;
use x25519_dalek::{PublicKey as AgreementPublicKeyDalek, StaticSecret};

const CHACHA_KEY_LENGTH: usize = 32;
const CHACHA_NONCE_LENGTH: usize = 12;

/// Concrete implementation of `CryptoProvider` for the classic suite:
/// X25519, Ed25519 and ChaCha20-Poly1305.
pub struct ClassicSuiteProvider;

fn to_array32(bytes: &[u8], what: &str) -> Result<[u8; 32], CryptoError> {
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidInputError(format!("Invalid {} length", what)))
}

impl CryptoProvider for ClassicSuiteProvider {
    type AgreementPublicKey = Vec<u8>;
    type AgreementPrivateKey = Vec<u8>;
    type SignaturePublicKey = Vec<u8>;
    type SignaturePrivateKey = Vec<u8>;

    fn generate_key_agreement_keys(
    ) -> Result<(Self::AgreementPrivateKey, Self::AgreementPublicKey), CryptoError> {
        let private_key = StaticSecret::random_from_rng(OsRng);
        let public_key = AgreementPublicKeyDalek::from(&private_key);
        Ok((private_key.to_bytes().to_vec(), public_key.to_bytes().to_vec()))
    }

    fn public_key_from_private(
        private_key: &Self::AgreementPrivateKey,
    ) -> Result<Self::AgreementPublicKey, CryptoError> {
        let bytes = to_array32(private_key, "key agreement private key")?;
        let static_secret = StaticSecret::from(bytes);
        Ok(AgreementPublicKeyDalek::from(&static_secret).to_bytes().to_vec())
    }

    fn agreement_public_key_from_bytes(bytes: Vec<u8>) -> Self::AgreementPublicKey {
        bytes
    }

    fn agreement_private_key_from_bytes(bytes: Vec<u8>) -> Self::AgreementPrivateKey {
        bytes
    }

    fn signature_public_key_from_bytes(bytes: Vec<u8>) -> Self::SignaturePublicKey {
        bytes
    }

    fn agree(
        private_key: &Self::AgreementPrivateKey,
        public_key: &Self::AgreementPublicKey,
    ) -> Result<Vec<u8>, CryptoError> {
        let secret = StaticSecret::from(to_array32(private_key, "key agreement private key")?);
        let peer = AgreementPublicKeyDalek::from(to_array32(public_key, "key agreement public key")?);

        let shared_secret = secret.diffie_hellman(&peer);
        // Low-order peer points collapse the secret to all zeroes
        if !shared_secret.was_contributory() {
            return Err(CryptoError::KeyAgreementError(
                "Peer public key produced a non-contributory shared secret".to_string(),
            ));
        }
        Ok(shared_secret.to_bytes().to_vec())
    }

    fn generate_signature_keys(
    ) -> Result<(Self::SignaturePrivateKey, Self::SignaturePublicKey), CryptoError> {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        Ok((
            signing_key.to_bytes().to_vec(),
            verifying_key.to_bytes().to_vec(),
        ))
    }

    fn sign(private_key: &Self::SignaturePrivateKey, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let bytes = to_array32(private_key, "signing key")?;
        let signing_key = SigningKey::from_bytes(&bytes);
        let signature = signing_key.sign(message);
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(
        public_key: &Self::SignaturePublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let vk_bytes = to_array32(public_key, "verifying key")?;
        let verifying_key = VerifyingKey::from_bytes(&vk_bytes)
            .map_err(|e| CryptoError::InvalidInputError(format!("Invalid verifying key: {}", e)))?;

        let sig_bytes: &[u8; 64] = signature
            .try_into()
            .map_err(|_| CryptoError::SignatureVerificationError("Invalid signature length".to_string()))?;
        let signature_obj = Signature::from_bytes(sig_bytes);

        verifying_key
            .verify(message, &signature_obj)
            .map_err(|e| CryptoError::SignatureVerificationError(e.to_string()))
    }

    fn aead_encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        if key.len() != CHACHA_KEY_LENGTH || nonce.len() != CHACHA_NONCE_LENGTH {
            return Err(CryptoError::InvalidInputError(
                "Invalid AEAD key or nonce length".to_string(),
            ));
        }
        let cipher = ChaCha20Poly1305::new(AeadKeyChacha::from_slice(key));
        let payload = Payload {
            msg: plaintext,
            aad: associated_data.unwrap_or(b""),
        };

        cipher
            .encrypt(Nonce::from_slice(nonce), payload)
            .map_err(|e| CryptoError::AeadEncryptionError(e.to_string()))
    }

    fn aead_decrypt(
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        if key.len() != CHACHA_KEY_LENGTH || nonce.len() != CHACHA_NONCE_LENGTH {
            return Err(CryptoError::InvalidInputError(
                "Invalid AEAD key or nonce length".to_string(),
            ));
        }
        let cipher = ChaCha20Poly1305::new(AeadKeyChacha::from_slice(key));
        let payload = Payload {
            msg: ciphertext,
            aad: associated_data.unwrap_or(b""),
        };

        cipher
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|e| CryptoError::AeadDecryptionError(e.to_string()))
    }

    fn aead_key_length() -> usize {
        CHACHA_KEY_LENGTH
    }

    fn aead_nonce_length() -> usize {
        CHACHA_NONCE_LENGTH
    }

    fn generate_nonce(len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut nonce_bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|e| CryptoError::KeyGenerationError(e.to_string()))?;
        Ok(nonce_bytes)
    }

    fn suite_id() -> u16 {
        crate::config::Config::global().classic_suite_id
    }
}
