//! Layered configuration loading
//!
//! Sources in ascending priority:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `ROSTER_*` environment variables, `__` separating nested keys
//!
//! Setting `ROSTER_CONFIG_FILE` (or calling [`ConfigLoader::with_config_file`])
//! replaces steps 1-3 with that single file.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "ROSTER_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "ROSTER_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "ROSTER";

const ENV_SEPARATOR: &str = "__";

/// Conventional connection string variable, consulted when `database.url` is empty
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `ROSTER_CONFIG_DIR`, `ROSTER_CONFIG_FILE` and
    /// `ROSTER_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both `ROSTER_CONFIG_DIR` and `ROSTER_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "ROSTER_CONFIG_DIR and ROSTER_CONFIG_FILE cannot both be set. \
                 Use ROSTER_CONFIG_DIR for layered configuration or \
                 ROSTER_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loads a single file instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self.config_file = None;
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads and validates settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings without validating them, so callers can apply further
    /// overrides before checking the result.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        apply_database_url_fallback(&mut settings, std::env::var(DATABASE_URL_ENV).ok());

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => add_file_source(builder, config_file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        // ROSTER_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let builder = add_file_source(
            builder,
            &self.config_dir.join(self.environment.config_file_name()),
            false,
        )?;
        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        }
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

/// Fills an empty `database.url` from `DATABASE_URL`.
fn apply_database_url_fallback(settings: &mut Settings, database_url: Option<String>) {
    if !settings.database.url.is_empty() {
        return;
    }

    if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
        settings.database.url = url;
    }
}
