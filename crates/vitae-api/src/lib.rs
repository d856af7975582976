//! JSON REST API for vitae resume records.
//!
//! Exposes an axum [`Router`] backed by any [`vitae_core::store::ResumeStore`].
//! TLS, static assets and CORS are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", vitae_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod resumes;

use std::sync::Arc;

use axum::{Router, routing::get};
use vitae_core::store::ResumeStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ResumeStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/resumes", get(resumes::list::<S>).post(resumes::create::<S>))
    .route(
      "/resumes/{id}",
      get(resumes::get_one::<S>)
        .put(resumes::update_one::<S>)
        .delete(resumes::delete_one::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests;
