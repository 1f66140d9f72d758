//! Session lifecycle
//!
//! Модель данных сессий, контракты внешних коллабораторов (store, ratchet
//! cipher, reset coordinator) и [`SessionReconciler`], который связывает их
//! вокруг каждого decrypt.
//!
//! ## Ответственность
//! - Определить, был ли session reset во время decrypt
//! - Выбрать авторитетное состояние и записать его в store
//! - Сообщить приложению о принятой сессии
//!
//! ## Не отвечает за
//! - Сам ratchet алгоритм (это делает [`SessionCipher`])
//! - Формат хранения записей (это делает [`SessionStore`])
//! - Статус reset'а (это делает [`SessionResetCoordinator`])

pub mod address;
pub mod cipher;
pub mod events;
pub mod message;
pub mod reconciler;
pub mod record;
pub mod reset;
pub mod store;

pub use address::ProtocolAddress;
pub use cipher::SessionCipher;
pub use events::{SessionEvent, SessionEventSink};
pub use message::{CipherMessage, CipherMessageType};
pub use reconciler::SessionReconciler;
pub use record::{SessionRecord, SessionState};
pub use reset::{NoSessionReset, SessionResetCoordinator, SessionResetStatus};
pub use store::SessionStore;
