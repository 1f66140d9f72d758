// Утилиты

pub mod serialization;
