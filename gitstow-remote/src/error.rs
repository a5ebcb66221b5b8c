//! Error types for gitstow-remote.

use std::path::PathBuf;

use thiserror::Error;

use gitstow_core::ManifestError;

/// All errors that can arise from remote sync operations.
///
/// API errors carry the status code and raw response body; nothing is retried
/// and there is no rate-limit backoff — every failure surfaces to the caller.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The provider rejected the token (HTTP 401/403).
    #[error("authentication failed ({status}): check your access token — {body}")]
    Auth { status: u16, body: String },

    /// Repository, reference, or file absent (HTTP 404).
    #[error("not found: {url}")]
    NotFound { url: String },

    /// A contents read resolved to a directory listing, not a single file.
    #[error("{path} is a directory, not a file")]
    NotAFile { path: String },

    /// Any other non-success status from the provider.
    #[error("GitHub API returned {status} for {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    /// DNS / TLS / connect failure before any HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response arrived but could not be decoded (bad JSON, bad base64).
    #[error("could not decode response from {url}: {detail}")]
    BadResponse { url: String, detail: String },

    /// Local filesystem failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from the manifest store.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Convenience constructor for [`RemoteError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RemoteError {
    RemoteError::Io {
        path: path.into(),
        source,
    }
}
