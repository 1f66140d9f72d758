// Session lifecycle core
// Session reset reconciliation, certificate validation and fallback cipher

#![warn(clippy::all)]

// Модули
pub mod config;
pub mod crypto;
pub mod error;
pub mod session;
pub mod storage;
pub mod utils;

// Re-exports для удобства
pub use error::{Result, SessionCipherError};
pub use session::SessionReconciler;
