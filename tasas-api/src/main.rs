//! tasas-api - read-only JSON API over the university fee catalog

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use tasas_api::{build_router, db, AppState};
use tasas_common::config::{resolve_root_folder, RootFolder, TomlConfig};

/// Command-line arguments for tasas-api
#[derive(Parser, Debug)]
#[command(name = "tasas-api")]
#[command(about = "Browsable API for universities and their fees")]
#[command(version)]
struct Args {
    /// Port to listen on (default: config file, then 5780)
    #[arg(short, long, env = "TASAS_API_PORT")]
    port: Option<u16>,

    /// Root folder holding the database
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Database file (overrides the one under the root folder)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, origin) = TomlConfig::discover();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Starting tasas-api v{}", env!("CARGO_PKG_VERSION"));
    origin.log();

    let root = resolve_root_folder(args.root_folder.as_deref(), &config);
    let mut root = RootFolder::new(root, &config);
    if let Some(database) = args.database {
        root = root.with_database(database);
    }
    info!("Database path: {}", root.database_path().display());

    let pool = match db::connect_readonly(root.database_path()).await {
        Ok(pool) => {
            info!("Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let state = AppState::new(pool).with_course_start_month(config.import.course_start_month);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.api.port);
    let addr = format!("{}:{}", config.api.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("tasas-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
