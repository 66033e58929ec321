//! tasas-import - load the university fee dataset into the database
//!
//! ```text
//! tasas-import unis.json img/uni/ [--overwrite]
//! ```
//!
//! Per-record problems are logged to stderr and the run still succeeds. A
//! missing input file or a malformed document exits with an error.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use tasas_common::config::{resolve_root_folder, RootFolder, TomlConfig};
use tasas_common::db::init_database;
use tasas_common::YearWindow;
use tasas_import::{import_file, ImportOptions};

/// Command-line arguments for tasas-import
#[derive(Parser, Debug)]
#[command(name = "tasas-import")]
#[command(about = "Load the JSON dataset of universities and fees into the database")]
#[command(version)]
struct Args {
    /// JSON file holding the `unis` list
    file: PathBuf,

    /// Directory with university logos, named uni_<siglas>.jpg
    #[arg(default_value = "img/uni/")]
    img_dir: PathBuf,

    /// Overwrite universities already in the database
    #[arg(long)]
    overwrite: bool,

    /// Root folder holding the database and media (default: TASAS_ROOT_FOLDER, config, OS default)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Database file (overrides the one under the root folder)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, origin) = TomlConfig::discover();

    // Logs go to stderr so per-record warnings land on the error stream
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting tasas-import v{}", env!("CARGO_PKG_VERSION"));
    origin.log();

    let root = resolve_root_folder(args.root_folder.as_deref(), &config);
    let mut root = RootFolder::new(root, &config);
    if let Some(database) = args.database {
        root = root.with_database(database);
    }
    root.ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = root.database_path();
    info!("Database: {}", db_path.display());
    let pool = init_database(db_path)
        .await
        .context("Failed to open database")?;

    let options = ImportOptions {
        logo_dir: args.img_dir,
        media_dir: root.media_path().to_path_buf(),
        overwrite: args.overwrite,
        window: YearWindow::configured_now(&config.import),
    };

    let summary = import_file(&pool, &args.file, &options).await?;
    summary.log();

    pool.close().await;
    Ok(())
}
