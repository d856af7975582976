//! Handlers for `/resumes` endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `POST`   | `/resumes`      | Body: [`ResumeBody`]; 400 without name/email |
//! | `GET`    | `/resumes`      | Summaries, newest first |
//! | `GET`    | `/resumes/:id`  | Full record; 404 if not found |
//! | `PUT`    | `/resumes/:id`  | Full replace; 400 without name/email, 404 if not found |
//! | `DELETE` | `/resumes/:id`  | Idempotent |
//!
//! A body that fails to decode answers 400 and an id that fails to parse
//! answers 404, both in the usual `{"error"}` envelope.

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use vitae_core::{
  resume::{Resume, ResumeBody, ResumeId, ResumeSummary},
  store::ResumeStore,
  wire::{Created, Message},
};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /resumes`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ResumeBody>, JsonRejection>,
) -> Result<Json<Created>, ApiError>
where
  S: ResumeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let fields = body.validate()?;
  let resume = store
    .insert(fields)
    .await
    .map_err(ApiError::store("Failed to save resume"))?;

  tracing::info!(id = resume.id, "resume saved");
  Ok(Json(Created {
    message: "Resume saved successfully".to_owned(),
    id:      resume.id,
  }))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /resumes`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<ResumeSummary>>, ApiError>
where
  S: ResumeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let resumes = store
    .list()
    .await
    .map_err(ApiError::store("Failed to fetch resumes"))?;
  Ok(Json(resumes))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /resumes/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<ResumeId>, PathRejection>,
) -> Result<Json<Resume>, ApiError>
where
  S: ResumeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let resume = store
    .get(id)
    .await
    .map_err(ApiError::store("Failed to fetch resume"))?
    .ok_or_else(not_found)?;
  Ok(Json(resume))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /resumes/:id`
///
/// Holds the same presence rule as create, so an update cannot blank out a
/// required field.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<ResumeId>, PathRejection>,
  body: Result<Json<ResumeBody>, JsonRejection>,
) -> Result<Json<Message>, ApiError>
where
  S: ResumeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let Json(body) = body?;
  let fields = body.validate()?;
  store
    .update(id, fields)
    .await
    .map_err(ApiError::store("Failed to update resume"))?
    .ok_or_else(not_found)?;

  tracing::info!(id, "resume updated");
  Ok(Json(Message { message: "Resume updated successfully".to_owned() }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /resumes/:id` — succeeds whether or not the row existed.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<ResumeId>, PathRejection>,
) -> Result<Json<Message>, ApiError>
where
  S: ResumeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let removed = store
    .delete(id)
    .await
    .map_err(ApiError::store("Failed to delete resume"))?;

  if removed {
    tracing::info!(id, "resume deleted");
  } else {
    tracing::debug!(id, "delete of absent resume");
  }
  Ok(Json(Message { message: "Resume deleted successfully".to_owned() }))
}

fn not_found() -> ApiError { ApiError::NotFound("Resume not found".to_owned()) }
