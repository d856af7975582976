//! Core types and trait definitions for the vitae resume pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, API, server and client crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod document;
pub mod error;
pub mod extract;
pub mod resume;
pub mod store;
pub mod wire;

pub use error::{Error, Result};
