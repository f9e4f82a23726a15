//! Validation rules for loaded settings
//!
//! Each section validates itself; `Settings::validate` reports the first
//! failure in section order.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings, StorageBackend,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// URL and pool sizing only matter for the postgres backend; the memory
    /// backend accepts any values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Memory {
            return Ok(());
        }

        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url, ROSTER_DATABASE__URL or DATABASE_URL.",
            ));
        }

        if !POSTGRES_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if self.rotation.max_size == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_size",
                "Rotation size must be greater than 0 bytes.",
            ));
        }

        if self.rotation.max_files == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_files",
                "At least one rotated file must be kept.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn postgres_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://roster@localhost/roster".to_string();
        settings
    }

    fn field_of(result: Result<(), ConfigError>) -> String {
        result
            .unwrap_err()
            .field()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_postgres_settings() {
        assert!(postgres_settings().validate().is_ok());
    }

    #[test]
    fn test_server_rejects_zero_port_and_timeout() {
        let mut server = ServerConfig::default();
        server.port = 0;
        assert_eq!(field_of(server.validate()), "server.port");

        let mut server = ServerConfig::default();
        server.request_timeout = 0;
        assert_eq!(field_of(server.validate()), "server.request_timeout");

        let mut server = ServerConfig::default();
        server.host = "  ".to_string();
        assert_eq!(field_of(server.validate()), "server.host");
    }

    #[test]
    fn test_postgres_requires_url() {
        let settings = Settings::default();
        assert_eq!(field_of(settings.validate()), "database.url");
    }

    #[test]
    fn test_postgres_url_scheme() {
        let mut database = postgres_settings().database;
        for url in ["postgres://h/db", "postgresql://u:p@h:5432/db"] {
            database.url = url.to_string();
            assert!(database.validate().is_ok(), "{url}");
        }

        for url in ["mysql://h/db", "sqlite::memory:", "localhost/db"] {
            database.url = url.to_string();
            assert_eq!(field_of(database.validate()), "database.url", "{url}");
        }
    }

    #[test]
    fn test_memory_backend_skips_database_rules() {
        let mut database = DatabaseConfig::default();
        database.backend = StorageBackend::Memory;
        database.url = "not a url".to_string();
        database.min_connections = 0;
        assert!(database.validate().is_ok());
    }

    #[test]
    fn test_pool_bounds() {
        let mut database = postgres_settings().database;
        database.min_connections = 0;
        assert_eq!(field_of(database.validate()), "database.min_connections");

        database.min_connections = 11;
        database.max_connections = 10;
        assert_eq!(field_of(database.validate()), "database.min_connections");

        database.min_connections = 1;
        database.connection_timeout = 0;
        assert_eq!(field_of(database.validate()), "database.connection_timeout");
    }

    #[test]
    fn test_logger_rules() {
        let mut logger = LoggerSettings::default();
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            logger.level = level.to_string();
            assert!(logger.validate().is_ok(), "{level}");
        }

        logger.level = "verbose".to_string();
        assert_eq!(field_of(logger.validate()), "logger.level");

        let mut logger = LoggerSettings::default();
        logger.console.enabled = false;
        assert_eq!(field_of(logger.validate()), "logger");

        logger.file.enabled = true;
        logger.file.path = String::new();
        assert_eq!(field_of(logger.validate()), "logger.file.path");
    }

    #[test]
    fn test_disabled_file_output_is_not_checked() {
        let mut logger = LoggerSettings::default();
        logger.file.path = String::new();
        logger.file.rotation.max_files = 0;
        assert!(logger.validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_pool_bounds(min in 0u32..40, max in 0u32..40) {
            let mut database = postgres_settings().database;
            database.min_connections = min;
            database.max_connections = max;
            prop_assert_eq!(database.validate().is_ok(), min > 0 && min <= max);
        }
    }
}
