//! Async HTTP client wrapping the vitae JSON API.

use std::{
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use vitae_core::{
  document::Document,
  resume::{Resume, ResumeBody, ResumeId, ResumeSummary},
  wire::{Created, ErrorBody, Message},
};

#[derive(Debug, Error)]
pub enum ClientError {
  /// The document has no header, or the header lacks a name or email.
  /// Raised before any request is made.
  #[error("Please make sure your resume has a header with name and email")]
  Validation,

  /// The server answered with a non-success status.
  #[error("{message}")]
  Api { status: StatusCode, message: String },

  #[error("Network error. Please try again.")]
  Network(#[source] reqwest::Error),
}

/// Async HTTP client for the vitae JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based, and clones
/// share the count of submissions in flight.
#[derive(Clone)]
pub struct ResumeClient {
  client:     Client,
  base_url:   String,
  submitting: Arc<AtomicUsize>,
}

impl ResumeClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(ClientError::Network)?;
    Ok(Self { client, base_url: base_url.into(), submitting: Arc::default() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Whether any submission, from this client or a clone, is in flight.
  pub fn is_submitting(&self) -> bool { self.submitting.load(Ordering::SeqCst) > 0 }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Extract a draft from `document` and create a record from it.
  ///
  /// Fails with [`ClientError::Validation`] without touching the network when
  /// the draft is missing or incomplete.
  pub async fn submit(&self, document: &Document) -> Result<ResumeId, ClientError> {
    let draft = document
      .extract_draft()
      .filter(|d| d.is_submittable())
      .ok_or(ClientError::Validation)?;

    let _busy = SubmitGuard::engage(&self.submitting);
    let resp = self
      .client
      .post(self.url("/resumes"))
      .json(&draft)
      .send()
      .await
      .map_err(ClientError::Network)?;

    let created: Created = decode(resp, "Failed to submit resume").await?;
    tracing::info!(id = created.id, "{}", created.message);
    Ok(created.id)
  }

  // ── Records ───────────────────────────────────────────────────────────────

  /// `GET /api/resumes`
  pub async fn list(&self) -> Result<Vec<ResumeSummary>, ClientError> {
    let resp = self
      .client
      .get(self.url("/resumes"))
      .send()
      .await
      .map_err(ClientError::Network)?;
    decode(resp, "Failed to fetch resumes").await
  }

  /// `GET /api/resumes/:id` — `None` on 404.
  pub async fn get(&self, id: ResumeId) -> Result<Option<Resume>, ClientError> {
    let resp = self
      .client
      .get(self.url(&format!("/resumes/{id}")))
      .send()
      .await
      .map_err(ClientError::Network)?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    decode(resp, "Failed to fetch resume").await.map(Some)
  }

  /// `PUT /api/resumes/:id`
  pub async fn update(&self, id: ResumeId, body: &ResumeBody) -> Result<(), ClientError> {
    let resp = self
      .client
      .put(self.url(&format!("/resumes/{id}")))
      .json(body)
      .send()
      .await
      .map_err(ClientError::Network)?;
    let _: Message = decode(resp, "Failed to update resume").await?;
    Ok(())
  }

  /// `DELETE /api/resumes/:id`
  pub async fn delete(&self, id: ResumeId) -> Result<(), ClientError> {
    let resp = self
      .client
      .delete(self.url(&format!("/resumes/{id}")))
      .send()
      .await
      .map_err(ClientError::Network)?;
    let _: Message = decode(resp, "Failed to delete resume").await?;
    Ok(())
  }
}

/// Decode a success body, or turn a failure status into
/// [`ClientError::Api`] carrying the server's message when it sent one.
async fn decode<T: DeserializeOwned>(resp: Response, fallback: &str) -> Result<T, ClientError> {
  let status = resp.status();
  if status.is_success() {
    return resp.json().await.map_err(ClientError::Network);
  }
  let message = match resp.json::<ErrorBody>().await {
    Ok(body) => body.error,
    Err(_) => fallback.to_owned(),
  };
  Err(ClientError::Api { status, message })
}

/// Counts one submission in flight until dropped, on every exit path.
struct SubmitGuard<'a>(&'a AtomicUsize);

impl<'a> SubmitGuard<'a> {
  fn engage(in_flight: &'a AtomicUsize) -> Self {
    in_flight.fetch_add(1, Ordering::SeqCst);
    Self(in_flight)
  }
}

impl Drop for SubmitGuard<'_> {
  fn drop(&mut self) { self.0.fetch_sub(1, Ordering::SeqCst); }
}
