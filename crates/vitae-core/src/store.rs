//! The `ResumeStore` trait.
//!
//! Implemented by storage backends (e.g. `vitae-store-sqlite`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::resume::{Resume, ResumeFields, ResumeId, ResumeSummary};

/// Abstraction over the table holding resume records.
///
/// Every operation affects at most one row. The store owns `id`,
/// `created_at` and `updated_at`; callers only ever supply
/// [`ResumeFields`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ResumeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new row and return it with its server-assigned id and
  /// timestamps.
  fn insert(
    &self,
    fields: ResumeFields,
  ) -> impl Future<Output = Result<Resume, Self::Error>> + Send + '_;

  /// All rows as summaries, most recently created first.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<ResumeSummary>, Self::Error>> + Send + '_;

  /// Retrieve a full record. Returns `None` if no row has this id.
  fn get(
    &self,
    id: ResumeId,
  ) -> impl Future<Output = Result<Option<Resume>, Self::Error>> + Send + '_;

  /// Replace every mutable field of an existing row and refresh its
  /// `updated_at`. Returns `None` if no row has this id.
  fn update(
    &self,
    id: ResumeId,
    fields: ResumeFields,
  ) -> impl Future<Output = Result<Option<Resume>, Self::Error>> + Send + '_;

  /// Remove a row. Returns `false` if there was nothing to remove.
  fn delete(
    &self,
    id: ResumeId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
