//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;
use vitae_core::wire::ErrorBody;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store failed. `context` is the only part the caller ever sees.
  #[error("{context}: {source}")]
  Store {
    context: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Adapter for `map_err` that wraps a store error under `context`.
  pub fn store<E>(context: &'static str) -> impl FnOnce(E) -> ApiError
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| ApiError::Store { context, source: Box::new(e) }
  }
}

impl From<vitae_core::Error> for ApiError {
  fn from(e: vitae_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

/// Body extraction failures keep the `{"error"}` envelope and never echo
/// decoder detail. A body that is not declared as JSON reads as empty, so it
/// fails the presence check like any other body without a name or email.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    match rejection {
      JsonRejection::MissingJsonContentType(_) => vitae_core::Error::MissingRequired.into(),
      JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
        ApiError::BadRequest("Invalid JSON body".to_owned())
      }
      _ => ApiError::BadRequest("Failed to read request body".to_owned()),
    }
  }
}

/// An id that does not parse cannot name a stored resume.
impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    tracing::debug!(error = %rejection.body_text(), "rejected resume id");
    ApiError::NotFound("Resume not found".to_owned())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Store { context, source } => {
        tracing::error!(error = %source, "{context}");
        (StatusCode::INTERNAL_SERVER_ERROR, context.to_owned())
      }
    };
    (status, Json(ErrorBody { error: message })).into_response()
  }
}
