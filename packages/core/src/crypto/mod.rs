//! Криптографический модуль
//!
//! # Архитектура
//!
//! ```text
//! ┌─────────────────────────────┐  ┌─────────────────────────────┐
//! │   CertificateValidator      │  │   FallbackSessionCipher     │
//! │  - sender field checks      │  │  - static X25519 agreement  │
//! │  - server signature check   │  │  - nonce || AEAD blob       │
//! │  - revocation list          │  │  - None on any failure      │
//! └─────────────────────────────┘  └─────────────────────────────┘
//!                │                                │
//!                └───────────────┬────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              CryptoProvider (Crypto-Agility)                │
//! │  - Key agreement (X25519)                                   │
//! │  - Signatures (Ed25519)                                     │
//! │  - AEAD (ChaCha20-Poly1305)                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

/// CryptoProvider trait для crypto-agility
pub mod provider;

/// Криптографические наборы (Classic)
pub mod suites;

/// Валидация sender/server сертификатов
pub mod certificate;

/// Fallback шифр для первого сообщения до установки сессии
pub mod fallback;

pub use certificate::{
    CertificateValidator, DefaultCertificateValidator, SenderCertificate, ServerCertificate,
};
pub use fallback::{FallbackSessionCipher, FALLBACK_IV_LENGTH};
pub use provider::CryptoProvider;

