//! person-vault entry point.
//!
//! Loads configuration, initializes tracing, builds the repository the config
//! asks for, wires repository -> service -> router explicitly, and serves
//! until SIGTERM/SIGINT.

use std::sync::Arc;

use clap::Parser;

use person_vault::config::{AppConfig, StorageBackend, DEFAULT_CONFIG_PATH};
use person_vault::repository::{InMemoryPersonRepository, PersonRepository, PgPersonRepository};
use person_vault::{create_router, http, logging, AppState, PersonService};

/// person-vault: a health check and a demo Person store
#[derive(Parser, Debug)]
#[command(name = "person-vault", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "person_vault=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Storage backend, overrides `storage.backend` from the config file
    #[arg(short, long, value_enum)]
    storage: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(backend) = args.storage {
        config.storage.backend = backend;
    }
    config.validate()?;

    let log_filter = logging::resolve_filter(args.log_level, std::env::var("RUST_LOG").ok());
    logging::init(&log_filter, &config.logging);

    tracing::info!(
        config = %args.config,
        backend = ?config.storage.backend,
        "Loaded configuration"
    );

    let repository: Arc<dyn PersonRepository> = match config.storage.backend {
        StorageBackend::Postgres => {
            let repo = PgPersonRepository::connect(&config.database).await?;
            repo.ensure_schema().await?;
            Arc::new(repo)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage - records are lost on restart");
            Arc::new(InMemoryPersonRepository::new())
        }
    };

    let state = AppState::new(PersonService::new(repository));
    let app = create_router(state);

    http::start_server(app, &config.http).await?;

    Ok(())
}
