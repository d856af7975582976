//! Debounced local caching of the unsaved draft.
//!
//! Every edit reschedules a save; the save only happens once the editor has
//! been idle for [`DRAFT_IDLE`]. The cached draft is a best-effort mirror and
//! is never sent to the server from here.

use std::{io, sync::Arc, time::Duration};

use thiserror::Error;
use vitae_core::{document::Document, resume::Draft};

use crate::{debounce::Debouncer, storage::LocalStorage};

/// Storage key the draft lives under.
pub const DRAFT_KEY: &str = "resumeDraft";

/// Inactivity required before a pending save fires.
pub const DRAFT_IDLE: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum DraftError {
  #[error("local storage error: {0}")]
  Storage(#[from] io::Error),

  #[error("draft encoding error: {0}")]
  Encoding(#[from] vitae_core::Error),
}

pub struct DraftCache<L> {
  storage:   Arc<L>,
  debouncer: Debouncer,
}

impl<L> DraftCache<L>
where
  L: LocalStorage + 'static,
{
  pub fn new(storage: L) -> Self { Self::with_idle(storage, DRAFT_IDLE) }

  pub fn with_idle(storage: L, idle: Duration) -> Self {
    Self { storage: Arc::new(storage), debouncer: Debouncer::new(idle) }
  }

  /// Note an edit. Cancels any pending save and schedules a new one for
  /// `document`. Must be called from inside a tokio runtime.
  ///
  /// The write itself runs on the blocking pool, off the runtime's workers.
  pub fn record_edit(&self, document: Document) {
    let storage = self.storage.clone();
    self.debouncer.schedule(async move {
      match tokio::task::spawn_blocking(move || save(storage.as_ref(), &document)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "failed to cache draft"),
        Err(e) => tracing::warn!(error = %e, "draft cache write did not complete"),
      }
    });
  }

  /// Save `document` now on the calling thread, dropping any pending save.
  /// Returns whether a draft was written.
  pub fn flush(&self, document: &Document) -> Result<bool, DraftError> {
    self.debouncer.cancel();
    save(self.storage.as_ref(), document)
  }

  pub fn is_pending(&self) -> bool { self.debouncer.is_pending() }

  /// The cached draft, if one exists. Only reports it; restoring it into an
  /// editor is up to the caller.
  pub fn load(&self) -> Result<Option<Draft>, DraftError> {
    let Some(raw) = self.storage.get(DRAFT_KEY)? else {
      return Ok(None);
    };
    let draft = Draft::from_json(&raw)?;
    tracing::info!("Draft resume found in local storage");
    Ok(Some(draft))
  }
}

fn save<L: LocalStorage + ?Sized>(storage: &L, document: &Document) -> Result<bool, DraftError> {
  let Some(draft) = document.extract_draft().filter(|d| !d.name.is_empty()) else {
    tracing::debug!("no header to cache");
    return Ok(false);
  };
  storage.set(DRAFT_KEY, &draft.to_json()?)?;
  tracing::debug!(name = %draft.name, "draft cached");
  Ok(true)
}
