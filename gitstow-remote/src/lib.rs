//! # gitstow-remote
//!
//! GitHub Git Data client and manifest-driven sync pipeline.
//!
//! The pipeline in [`sync`] runs against the [`GitData`] seam; [`GitHubClient`]
//! is its blocking `ureq` implementation. Call [`sync::upload_all`] to push the
//! registered files as a new commit on the branch, [`sync::download_all`] +
//! [`sync::write_local`] to pull them back.

pub mod api;
pub mod client;
pub mod error;
pub mod sync;

pub use client::{GitData, GitHubClient};
pub use error::RemoteError;
pub use sync::{download_all, read_local, upload_all, write_local, FetchedFile};
