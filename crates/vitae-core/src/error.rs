//! Error types for `vitae-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Name and email are required")]
  MissingRequired,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
