//! Client side of the vitae pipeline: the HTTP transport to the API and the
//! debounced local draft cache.

pub mod client;
pub mod debounce;
pub mod draft;
pub mod storage;

pub use client::{ClientError, ResumeClient};
pub use draft::DraftCache;
