//! Key/value local storage for drafts.

use std::{
  collections::HashMap,
  io,
  path::{Path, PathBuf},
  sync::{Mutex, PoisonError},
};

/// A string-keyed, string-valued store local to one client.
///
/// Calls may block on I/O. The draft cache runs its scheduled writes on
/// tokio's blocking pool.
pub trait LocalStorage: Send + Sync {
  fn get(&self, key: &str) -> io::Result<Option<String>>;

  /// Write `value` under `key`, replacing whatever was there.
  fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

// ─── Files ───────────────────────────────────────────────────────────────────

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &Path { &self.dir }

  fn path(&self, key: &str) -> PathBuf { self.dir.join(format!("{key}.json")) }
}

impl LocalStorage for FileStorage {
  fn get(&self, key: &str) -> io::Result<Option<String>> {
    match std::fs::read_to_string(self.path(key)) {
      Ok(s) => Ok(Some(s)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }

  fn set(&self, key: &str, value: &str) -> io::Result<()> {
    std::fs::create_dir_all(&self.dir)?;
    std::fs::write(self.path(key), value)
  }
}

// ─── Memory ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
}

impl LocalStorage for MemoryStorage {
  fn get(&self, key: &str) -> io::Result<Option<String>> {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> io::Result<()> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}
