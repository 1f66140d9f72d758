//! Sender and server certificate validation.
//!
//! ## Canonical server certificate encoding
//!
//! The bytes signed by the trust root are the protobuf (proto2) encoding of
//!
//! ```text
//! message Certificate {
//!   optional uint32 id  = 1;
//!   optional bytes  key = 2;
//! }
//! ```
//!
//! with both fields present, in field order. Any signer must produce exactly
//! this byte layout; [`canonical_server_payload`] is the single place it is built.

use crate::crypto::provider::CryptoProvider;
use crate::crypto::suites::classic::ClassicSuiteProvider;
use crate::error::{CertificateError, CryptoError};
use prost::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::error;

/// Server certificate key ids that are never accepted, whatever their signature.
pub const REVOKED_SERVER_CERTIFICATE_IDS: &[u32] = &[];

#[derive(Clone, PartialEq, Message)]
struct ServerCertificatePayload {
    #[prost(uint32, optional, tag = "1")]
    id: Option<u32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    key: Option<Vec<u8>>,
}

/// Builds the exact byte form signed for a server certificate.
pub fn canonical_server_payload(key_id: u32, key: &[u8]) -> Vec<u8> {
    ServerCertificatePayload {
        id: Some(key_id),
        key: Some(key.to_vec()),
    }
    .encode_to_vec()
}

/// Certificate issued by the trust root to a server signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCertificate {
    pub key_id: u32,
    pub key: Vec<u8>,
    pub signature: Vec<u8>,
}

impl ServerCertificate {
    /// Signs `(key_id, key)` with the trust root's private key.
    pub fn new<P: CryptoProvider>(
        key_id: u32,
        key: Vec<u8>,
        trust_root: &P::SignaturePrivateKey,
    ) -> Result<Self, CryptoError> {
        let signature = P::sign(trust_root, &canonical_server_payload(key_id, &key))?;
        Ok(Self {
            key_id,
            key,
            signature,
        })
    }

    pub fn canonical_payload(&self) -> Vec<u8> {
        canonical_server_payload(self.key_id, &self.key)
    }
}

/// Certificate attesting to the identity of a message sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCertificate {
    pub sender_recipient_id: String,
    pub sender_device_id: u32,
    pub identity_key: Vec<u8>,
    /// Expiry timestamp in milliseconds. Not checked by [`DefaultCertificateValidator`].
    pub expiration: u64,
    pub signer: ServerCertificate,
}

pub trait CertificateValidator {
    fn validate_sender(
        &self,
        certificate: &SenderCertificate,
        validation_time: u64,
    ) -> Result<(), CertificateError>;

    fn validate_server(&self, certificate: &ServerCertificate) -> Result<(), CertificateError>;
}

/// Validates certificates against a single trust root.
pub struct DefaultCertificateValidator<P: CryptoProvider = ClassicSuiteProvider> {
    trust_root: P::SignaturePublicKey,
    revoked: HashSet<u32>,
    _provider: PhantomData<P>,
}

impl<P: CryptoProvider> DefaultCertificateValidator<P> {
    pub fn new(trust_root: P::SignaturePublicKey) -> Self {
        Self {
            trust_root,
            revoked: REVOKED_SERVER_CERTIFICATE_IDS.iter().copied().collect(),
            _provider: PhantomData,
        }
    }

    /// Adds key ids to the revocation set on top of the built-in list.
    pub fn with_revoked_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.revoked.extend(ids);
        self
    }

    pub fn is_revoked(&self, key_id: u32) -> bool {
        self.revoked.contains(&key_id)
    }
}

fn reject(err: CertificateError) -> Result<(), CertificateError> {
    error!(target: "crypto::certificate", error = %err, "Certificate rejected");
    Err(err)
}

impl<P: CryptoProvider> CertificateValidator for DefaultCertificateValidator<P> {
    fn validate_sender(
        &self,
        certificate: &SenderCertificate,
        _validation_time: u64,
    ) -> Result<(), CertificateError> {
        if certificate.sender_recipient_id.is_empty() {
            return reject(CertificateError::MissingField("sender_recipient_id"));
        }
        if certificate.sender_device_id == 0 {
            return reject(CertificateError::MissingField("sender_device_id"));
        }
        Ok(())
    }

    fn validate_server(&self, certificate: &ServerCertificate) -> Result<(), CertificateError> {
        let payload = certificate.canonical_payload();

        if let Err(e) = P::verify(&self.trust_root, &payload, &certificate.signature) {
            return reject(CertificateError::SignatureVerificationFailed(e.to_string()));
        }

        if self.is_revoked(certificate.key_id) {
            return reject(CertificateError::Revoked(certificate.key_id));
        }

        Ok(())
    }
}
