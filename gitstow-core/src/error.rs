//! Error types for gitstow-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file exists but its first line is not the `[FILES]` sentinel.
    #[error("manifest at {path} is missing the [FILES] header line")]
    MissingHeader { path: PathBuf },

    /// A data line had fewer than the three positional fields the format requires.
    #[error("malformed manifest entry in {path}: {line:?}")]
    MalformedEntry { path: PathBuf, line: String },

    /// The wire format is whitespace-delimited; a name or path containing
    /// whitespace cannot be represented and would be truncated on reload.
    #[error("{what} {value:?} contains whitespace and cannot be stored in the manifest")]
    WhitespaceInField {
        what: &'static str,
        value: String,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.gitstow/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`ManifestError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ManifestError {
    ManifestError::Io {
        path: path.into(),
        source,
    }
}
