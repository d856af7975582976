//! vitae-server binary.
//!
//! Reads `vitae.toml` (or the path given with `--config`), opens the SQLite
//! store, creating the `resumes` table if needed, and serves the API and the
//! static editor over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vitae_server::{ServerConfig, expand_tilde};
use vitae_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "vitae resume server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "vitae.toml")]
  config: PathBuf,
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

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!("Resumes table ready at {store_path:?}");

  let app = vitae_server::app(Arc::new(store), &server_cfg.static_dir);
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");
  tracing::info!("API available at http://{address}/api");

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
