//! Dispatches a parsed command to its handler.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Execute a CLI command with the given settings.
///
/// No subcommand means `serve`.
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            warn_privileged_port(&settings);
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
    }
}

fn warn_privileged_port(settings: &Settings) {
    if settings.server.port < 1024 {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a port below 1024 typically requires elevated privileges"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/roster_test".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["roster-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, create_valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run_invalid() {
        let cli = Cli::try_parse_from(["roster-rs", "serve", "--dry-run"]).unwrap();
        let mut config = create_valid_config();
        config.logger.level = "loud".to_string();
        assert!(execute_command(&cli, config).await.is_err());
    }
}
