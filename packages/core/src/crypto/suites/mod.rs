//! Криптографические наборы (Crypto Suites)
//!
//! Этот модуль содержит реализации CryptoProvider trait.
//!
//! ## Доступные наборы
//!
//! ### Classic Suite
//! - **Key agreement**: X25519 (ECDH на Curve25519)
//! - **Signatures**: Ed25519
//! - **AEAD**: ChaCha20-Poly1305
//! - **Suite ID**: 1
//!
//! ## Выбор suite
//!
//! ```rust
//! use session_lifecycle_core::crypto::suites::classic::ClassicSuiteProvider;
//! use session_lifecycle_core::crypto::provider::CryptoProvider;
//!
//! type MySuite = ClassicSuiteProvider;
//!
//! let (private_key, public_key) = MySuite::generate_key_agreement_keys().unwrap();
//! assert_eq!(public_key.len(), 32);
//! # let _ = private_key;
//! ```

pub mod classic;
