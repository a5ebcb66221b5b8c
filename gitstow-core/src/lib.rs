//! Gitstow core library — manifest types, persistence, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`ManifestError`]
//! - [`manifest`] — the [`Manifest`] store: load / register / deregister / save

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use manifest::{Manifest, MANIFEST_HEADER};
pub use types::{ManifestEntry, RemoteName};
