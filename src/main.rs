use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use goals_api::app::{app, AppState};
use goals_api::auth::{generate_jwt, Claims};
use goals_api::config;
use goals_api::database::{AccountStore, DatabaseManager, MemoryAccountStore, PgAccountStore};

#[derive(Debug, Parser)]
#[command(name = "goals-api", version, about = "Owner-scoped goal records over REST")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Overrides GOALS_API_PORT / PORT
        #[arg(long)]
        port: Option<u16>,
        /// Use the in-memory store even when DATABASE_URL is set
        #[arg(long)]
        memory: bool,
    },
    /// Print a bearer token for a user id
    Token {
        #[arg(long)]
        user: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("goals_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve {
        port: None,
        memory: false,
    }) {
        Command::Serve { port, memory } => serve(port, memory).await,
        Command::Token { user } => {
            let config = config::config();
            let claims = Claims::new(user, config.security.jwt_expiry_hours);
            let token = generate_jwt(&claims, &config.security.jwt_secret)?;
            println!("{}", token);
            Ok(())
        }
    }
}

async fn serve(port: Option<u16>, memory: bool) -> Result<()> {
    let config = config::config();
    info!("Starting Goals API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        bail!("JWT_SECRET must be set outside development");
    }

    let store: Arc<dyn AccountStore> = match &config.database.url {
        Some(_) if !memory => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to the account database")?;
            Arc::new(PgAccountStore::new(pool))
        }
        _ if memory || goals_api::is_development!() => {
            warn!("Using the in-memory account store; records are lost on restart");
            Arc::new(MemoryAccountStore::new())
        }
        _ => bail!("DATABASE_URL must be set outside development"),
    };

    let state = AppState::new(store, config.security.jwt_secret.as_str())
        .with_request_logging(config.api.enable_request_logging);
    let mut router = app(state);
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.api.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Goals API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
