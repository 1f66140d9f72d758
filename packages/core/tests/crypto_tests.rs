//! Tests for the cryptographic side of the session lifecycle core
//!
//! This test suite covers:
//! - Classic Suite Provider (X25519, Ed25519, ChaCha20-Poly1305)
//! - Server and sender certificate validation
//! - Fallback session cipher

use session_lifecycle_core::crypto::certificate::canonical_server_payload;
use session_lifecycle_core::crypto::suites::classic::ClassicSuiteProvider;
use session_lifecycle_core::crypto::{
    CertificateValidator, CryptoProvider, DefaultCertificateValidator, FallbackSessionCipher,
    SenderCertificate, ServerCertificate, FALLBACK_IV_LENGTH,
};
use session_lifecycle_core::error::CertificateError;

type Validator = DefaultCertificateValidator<ClassicSuiteProvider>;
type Fallback = FallbackSessionCipher<ClassicSuiteProvider>;

/// Test signature creation and verification
#[test]
fn test_classic_suite_sign_verify() {
    let (signing_key, verifying_key) = ClassicSuiteProvider::generate_signature_keys().unwrap();
    let message = b"Hello, session lifecycle!";

    let signature = ClassicSuiteProvider::sign(&signing_key, message).unwrap();

    // Ed25519 signature should be 64 bytes
    assert_eq!(signature.len(), 64, "Signature should be 64 bytes");

    let verify_result = ClassicSuiteProvider::verify(&verifying_key, message, &signature);
    assert!(verify_result.is_ok(), "Signature verification failed");
}

/// Test that signature verification fails with wrong message
#[test]
fn test_classic_suite_verify_fails_with_wrong_message() {
    let (signing_key, verifying_key) = ClassicSuiteProvider::generate_signature_keys().unwrap();

    let signature = ClassicSuiteProvider::sign(&signing_key, b"Original message").unwrap();

    let verify_result = ClassicSuiteProvider::verify(&verifying_key, b"Modified message", &signature);
    assert!(verify_result.is_err(), "Verification should fail with wrong message");
}

/// Test AEAD encryption and decryption
#[test]
fn test_classic_suite_aead_encrypt_decrypt() {
    let key = vec![0u8; 32];
    let nonce = ClassicSuiteProvider::generate_nonce(12).unwrap();
    let plaintext = b"Secret message for encryption test";
    let aad = b"associated data";

    let ciphertext = ClassicSuiteProvider::aead_encrypt(&key, &nonce, plaintext, Some(aad)).unwrap();

    // Ciphertext should be plaintext + 16-byte tag
    assert_eq!(ciphertext.len(), plaintext.len() + 16, "Ciphertext length incorrect");

    let decrypted = ClassicSuiteProvider::aead_decrypt(&key, &nonce, &ciphertext, Some(aad)).unwrap();
    assert_eq!(decrypted, plaintext, "Decrypted plaintext doesn't match");
}

/// Test that AEAD decryption fails with wrong key
#[test]
fn test_classic_suite_aead_decrypt_fails_with_wrong_key() {
    let key = vec![0u8; 32];
    let wrong_key = vec![1u8; 32];
    let nonce = ClassicSuiteProvider::generate_nonce(12).unwrap();

    let ciphertext = ClassicSuiteProvider::aead_encrypt(&key, &nonce, b"Secret message", None).unwrap();

    let result = ClassicSuiteProvider::aead_decrypt(&wrong_key, &nonce, &ciphertext, None);
    assert!(result.is_err(), "Decryption should fail with wrong key");
}

// ============================================================================
// Certificates
// ============================================================================

struct TrustRoot {
    signing_key: Vec<u8>,
    validator: Validator,
}

fn trust_root() -> TrustRoot {
    let (signing_key, verifying_key) = ClassicSuiteProvider::generate_signature_keys().unwrap();
    TrustRoot {
        signing_key,
        validator: Validator::new(verifying_key),
    }
}

fn server_key() -> Vec<u8> {
    let (_, public_key) = ClassicSuiteProvider::generate_key_agreement_keys().unwrap();
    public_key
}

/// A certificate signed over the canonical (id, key) encoding validates
#[test]
fn test_server_certificate_valid() {
    let root = trust_root();
    let certificate = ServerCertificate::new::<ClassicSuiteProvider>(7, server_key(), &root.signing_key).unwrap();

    assert_eq!(root.validator.validate_server(&certificate), Ok(()));
}

/// Flipping any single signature byte breaks validation
#[test]
fn test_server_certificate_tampered_signature() {
    let root = trust_root();
    let certificate = ServerCertificate::new::<ClassicSuiteProvider>(7, server_key(), &root.signing_key).unwrap();

    for index in 0..certificate.signature.len() {
        let mut tampered = certificate.clone();
        tampered.signature[index] ^= 0x01;

        let result = root.validator.validate_server(&tampered);
        assert!(
            matches!(result, Err(CertificateError::SignatureVerificationFailed(_))),
            "Byte {} flip should fail signature check, got {:?}",
            index,
            result
        );
    }
}

/// The signature covers the key id as well as the key
#[test]
fn test_server_certificate_key_id_is_signed() {
    let root = trust_root();
    let mut certificate = ServerCertificate::new::<ClassicSuiteProvider>(7, server_key(), &root.signing_key).unwrap();
    certificate.key_id = 8;

    assert!(matches!(
        root.validator.validate_server(&certificate),
        Err(CertificateError::SignatureVerificationFailed(_))
    ));
}

/// A revoked key id fails even with a valid signature
#[test]
fn test_server_certificate_revoked() {
    let root = trust_root();
    let certificate = ServerCertificate::new::<ClassicSuiteProvider>(7, server_key(), &root.signing_key).unwrap();
    let validator = root.validator.with_revoked_ids([7]);

    assert_eq!(validator.validate_server(&certificate), Err(CertificateError::Revoked(7)));
}

/// Signed by someone other than the trust root
#[test]
fn test_server_certificate_wrong_root() {
    let root = trust_root();
    let (other_signing_key, _) = ClassicSuiteProvider::generate_signature_keys().unwrap();
    let certificate = ServerCertificate::new::<ClassicSuiteProvider>(7, server_key(), &other_signing_key).unwrap();

    assert!(matches!(
        root.validator.validate_server(&certificate),
        Err(CertificateError::SignatureVerificationFailed(_))
    ));
}

/// An external signer that follows the documented encoding interoperates
#[test]
fn test_server_certificate_external_signer() {
    let root = trust_root();
    let key = server_key();
    let signature = ClassicSuiteProvider::sign(&root.signing_key, &canonical_server_payload(7, &key)).unwrap();

    let certificate = ServerCertificate {
        key_id: 7,
        key,
        signature,
    };
    assert_eq!(root.validator.validate_server(&certificate), Ok(()));
}

#[test]
fn test_sender_certificate_fields() {
    let root = trust_root();
    let signer = ServerCertificate::new::<ClassicSuiteProvider>(1, server_key(), &root.signing_key).unwrap();
    let mut certificate = SenderCertificate {
        sender_recipient_id: "05d3a4".to_string(),
        sender_device_id: 1,
        identity_key: server_key(),
        expiration: 1_000,
        signer,
    };

    // no expiry comparison in the base policy
    assert_eq!(root.validator.validate_sender(&certificate, 5_000), Ok(()));

    certificate.sender_device_id = 0;
    assert_eq!(
        root.validator.validate_sender(&certificate, 0),
        Err(CertificateError::MissingField("sender_device_id"))
    );
}

// ============================================================================
// Fallback session cipher
// ============================================================================

struct Pair {
    alice: Fallback,
    bob: Fallback,
}

fn fallback_pair() -> Pair {
    let (alice_private, alice_public) = ClassicSuiteProvider::generate_key_agreement_keys().unwrap();
    let (bob_private, bob_public) = ClassicSuiteProvider::generate_key_agreement_keys().unwrap();

    Pair {
        // Alice addresses Bob with a type-marker prefixed key
        alice: Fallback::new(&format!("05{}", hex::encode(&bob_public)), Some(alice_private)),
        bob: Fallback::new(&hex::encode(&alice_public), Some(bob_private)),
    }
}

#[test]
fn test_fallback_round_trip() {
    let pair = fallback_pair();

    for plaintext in [&b""[..], &b"hi"[..], &[0xABu8; 4096][..]] {
        let blob = pair.alice.encrypt(plaintext).unwrap();
        assert_eq!(blob.len(), FALLBACK_IV_LENGTH + plaintext.len() + 16);
        assert_eq!(pair.bob.decrypt(&blob).as_deref(), Some(plaintext));
    }
}

/// Fresh nonce per call: same plaintext, different blobs, both decrypt
#[test]
fn test_fallback_ciphertexts_are_randomized() {
    let pair = fallback_pair();
    let plaintext = b"first contact";

    let first = pair.alice.encrypt(plaintext).unwrap();
    let second = pair.alice.encrypt(plaintext).unwrap();

    assert_ne!(first, second);
    assert_eq!(pair.bob.decrypt(&first).unwrap(), plaintext);
    assert_eq!(pair.bob.decrypt(&second).unwrap(), plaintext);
}

#[test]
fn test_fallback_without_private_key_is_unavailable() {
    let (_, bob_public) = ClassicSuiteProvider::generate_key_agreement_keys().unwrap();
    let cipher = Fallback::new(&hex::encode(bob_public), None);

    assert!(!cipher.is_available());
    assert_eq!(cipher.encrypt(b"anything"), None);
    assert_eq!(cipher.decrypt(&[0u8; 64]), None);
    assert_eq!(cipher.decrypt(&[]), None);
}

#[test]
fn test_fallback_tampered_blob_is_rejected() {
    let pair = fallback_pair();
    let mut blob = pair.alice.encrypt(b"do not touch").unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0x80;

    assert_eq!(pair.bob.decrypt(&blob), None);
}

#[test]
fn test_fallback_wrong_peer_cannot_decrypt() {
    let pair = fallback_pair();
    let (eve_private, _) = ClassicSuiteProvider::generate_key_agreement_keys().unwrap();
    let (_, alice_public_guess) = ClassicSuiteProvider::generate_key_agreement_keys().unwrap();
    let eve = Fallback::new(&hex::encode(alice_public_guess), Some(eve_private));

    let blob = pair.alice.encrypt(b"for bob only").unwrap();
    assert_eq!(eve.decrypt(&blob), None);
}

/// Test random number generation quality (entropy check)
#[test]
fn test_random_number_quality() {
    let mut bytes_set = std::collections::HashSet::new();

    for _ in 0..100 {
        let nonce = ClassicSuiteProvider::generate_nonce(FALLBACK_IV_LENGTH).unwrap();
        let nonce_hex = hex::encode(&nonce);

        assert!(
            bytes_set.insert(nonce_hex.clone()),
            "Duplicate nonce generated: {}",
            nonce_hex
        );
    }

    assert_eq!(bytes_set.len(), 100, "Not all nonces are unique");
}
