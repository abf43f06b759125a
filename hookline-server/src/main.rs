//! # Hookline Server
//!
//! Receives GitHub webhook deliveries, keeps a normalized activity feed in
//! PostgreSQL and serves it as JSON and as a recent-activity page.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use hookline_config::{Config, ConfigLoad, ConfigLoader};
use hookline_server::{
    create_app,
    infra::{
        app_state::AppState,
        startup::{connect_database, connect_store},
    },
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "hookline-server")]
#[command(about = "GitHub webhook receiver and repository activity feed")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a hookline.toml configuration file
    #[arg(long, env = "HOOKLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let Some(url) = config.database.url.as_deref() else {
        bail!("DATABASE_URL must be set to run migrations");
    };

    let database = connect_database(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    database
        .initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(
                    message = %warning.message,
                    hint = %hint,
                    "configuration warning"
                )
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_runtime_config(&args)?);
    let store = connect_store(&config).await?;
    let state = AppState::new(store, Arc::clone(&config));
    let app = create_app(state);

    let address = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;

    info!(
        address = %listener.local_addr()?,
        dev_mode = config.dev_mode,
        "Hookline server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "hookline-server",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(8080));
        assert_eq!(cli.serve.host.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn cli_parses_migrate_subcommand() {
        let cli =
            Cli::try_parse_from(["hookline-server", "db", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Db(DbCommand::Migrate))));
    }
}
