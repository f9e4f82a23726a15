//! Merges CLI argument overrides into file-based configuration.
//!
//! Precedence, highest first: `serve` flags, global flags, environment
//! variables, configuration files.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration, honoring `--config` and `--env`.
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args) so a
    /// flag such as `--port` can repair an invalid file value.
    ///
    /// # Errors
    /// Returns ConfigError if the sources cannot be read or deserialized
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Applies CLI overrides and validates the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(command) = &cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } => {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }

            if let Some(port_num) = port {
                config.server.port = *port_num;
            }

            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }
    }
}
