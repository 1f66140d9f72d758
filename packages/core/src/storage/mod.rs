// Модуль хранилища session records

pub mod memory;

pub use memory::{MemorySessionStore, MemoryTransaction};
