//! HTTP process for vitae: the JSON API under `/api` plus the editor's static
//! assets for every other path.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use vitae_core::store::ResumeStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered lowest to highest: built-in defaults, the optional TOML file,
/// `VITAE_*` environment variables, then `PORT`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub static_dir: PathBuf,
}

impl ServerConfig {
  /// Load from `file` and the process environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_port(file, std::env::var("PORT").ok())
  }

  /// Like [`ServerConfig::load`], with the `PORT` value passed in. It wins
  /// over every other source and must parse as a port number.
  pub fn load_with_port(file: &Path, port: Option<String>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3000_i64)?
      .set_default("store_path", "resumes.db")?
      .set_default("static_dir", "public")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("VITAE"))
      .set_override_option("port", port)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn app<S>(store: Arc<S>, static_dir: &Path) -> Router
where
  S: ResumeStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", vitae_api::api_router(store))
    .fallback_service(ServeDir::new(static_dir))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
