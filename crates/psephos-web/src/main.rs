//! psephos server binary.
//!
//! Reads `psephos.toml` (or the path given with `--config`), opens the SQLite
//! catalog and serves the web interface. Maintenance subcommands create the
//! schema and import a tab-separated word list.
//!
//! ```text
//! cargo run -p psephos-web --bin psephos -- init-db --force
//! cargo run -p psephos-web --bin psephos -- import --dataset words.tsv
//! cargo run -p psephos-web --bin psephos
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use psephos_store_sqlite::SqliteStore;
use psephos_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "psephos word catalog")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "psephos.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the web interface (the default).
  Serve,
  /// Create the database schema.
  InitDb {
    /// Delete any existing database file first.
    #[arg(long)]
    force: bool,
  },
  /// Import a tab-separated word list (first column is the word).
  Import {
    /// Dataset to read; defaults to `dataset_path` from the config.
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Rows per committed batch; defaults to `import_batch_size`.
    #[arg(long)]
    batch_size: Option<usize>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(cfg).await,
    Command::InitDb { force } => init_db(&cfg, force).await,
    Command::Import { dataset, batch_size } => {
      let dataset = dataset.unwrap_or_else(|| cfg.dataset_path.clone());
      let batch_size = batch_size.unwrap_or(cfg.import_batch_size);
      import(&cfg, dataset, batch_size).await
    }
  }
}

/// Open the store, copying the seed database into place on first run.
async fn open_store(cfg: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let store_path = &cfg.store_path;

  if let Some(seed) = &cfg.seed_path
    && !tokio::fs::try_exists(store_path).await.unwrap_or(false)
    && tokio::fs::try_exists(seed).await.unwrap_or(false)
  {
    if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create {parent:?}"))?;
    }
    tokio::fs::copy(seed, store_path)
      .await
      .with_context(|| format!("failed to copy seed {seed:?} to {store_path:?}"))?;
    tracing::info!(seed = %seed.display(), "seeded database on first run");
  }

  SqliteStore::open(store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))
}

async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
  let store = open_store(&cfg).await?;
  let state = AppState { store: Arc::new(store) };

  let app = psephos_web::router(state);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn init_db(cfg: &ServerConfig, force: bool) -> anyhow::Result<()> {
  let store_path = &cfg.store_path;

  if force {
    for suffix in ["", "-wal", "-shm"] {
      let mut file = store_path.clone().into_os_string();
      file.push(suffix);
      match tokio::fs::remove_file(&file).await {
        Ok(()) => tracing::info!(path = ?file, "removed existing database file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
          return Err(e).with_context(|| format!("failed to remove {file:?}"));
        }
      }
    }
  }

  SqliteStore::open(store_path)
    .await
    .with_context(|| format!("failed to initialise store at {store_path:?}"))?;
  tracing::info!(path = %store_path.display(), "database ready");
  Ok(())
}

async fn import(
  cfg: &ServerConfig,
  dataset: PathBuf,
  batch_size: usize,
) -> anyhow::Result<()> {
  let store = open_store(cfg).await?;

  let report = psephos_import::import_dataset(&store, &dataset, batch_size)
    .await
    .with_context(|| format!("failed to import {dataset:?}"))?;

  if report.source_missing {
    tracing::info!(dataset = %dataset.display(), "import skipped");
  } else {
    tracing::info!(
      committed = report.committed,
      skipped_blank = report.skipped_blank,
      store = %cfg.store_path.display(),
      "import complete"
    );
  }
  Ok(())
}
