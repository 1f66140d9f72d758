//! Централизованная конфигурация для session lifecycle core
//!
//! Все константы и настройки должны быть определены здесь,
//! чтобы избежать хардкода по всему проекту.

use std::sync::OnceLock;

/// Глобальная конфигурация (синглтон)
static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Основная структура конфигурации
#[derive(Debug, Clone)]
pub struct Config {
    // ============================================
    // КРИПТОГРАФИЧЕСКИЕ ПАРАМЕТРЫ
    // ============================================

    /// Размер публичного ключа X25519 (в байтах)
    pub public_key_size: usize,

    /// Hex-префикс типа ключа, который может стоять перед публичным ключом
    pub key_type_marker: &'static str,

    /// Длина hex-строки публичного ключа вместе с префиксом типа
    pub prefixed_public_key_hex_length: usize,

    /// ID классического криптографического набора (Classic Suite)
    pub classic_suite_id: u16,

    // ============================================
    // SESSION RECORD ПАРАМЕТРЫ
    // ============================================

    /// Максимальное количество архивных состояний в одной SessionRecord.
    /// Самые старые удаляются первыми.
    pub max_archived_states: usize,
}

impl Config {
    /// Создать конфигурацию с дефолтными значениями
    pub fn default() -> Self {
        Self {
            // Криптография
            public_key_size: 32,
            key_type_marker: "05",
            prefixed_public_key_hex_length: 66,
            classic_suite_id: 1,

            // Session records
            max_archived_states: 40,
        }
    }

    /// Создать конфигурацию из переменных окружения
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MAX_ARCHIVED_STATES") {
            if let Ok(parsed) = val.parse() {
                config.max_archived_states = parsed;
            }
        }

        config
    }

    /// Получить глобальный экземпляр конфигурации
    ///
    /// Автоматически инициализирует конфигурацию со значениями по умолчанию при первом вызове
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Config::default)
    }

    /// Инициализировать глобальную конфигурацию со значениями по умолчанию
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init() -> Result<(), &'static str> {
        GLOBAL_CONFIG.set(Self::default())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию из переменных окружения
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_from_env() -> Result<(), &'static str> {
        GLOBAL_CONFIG.set(Self::from_env())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию с кастомным экземпляром
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_with(config: Config) -> Result<(), &'static str> {
        GLOBAL_CONFIG.set(config)
            .map_err(|_| "Config already initialized")
    }

    /// Проверить, инициализирована ли глобальная конфигурация
    pub fn is_initialized() -> bool {
        GLOBAL_CONFIG.get().is_some()
    }
}
