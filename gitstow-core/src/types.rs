//! Domain types for the gitstow manifest.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a file as it appears in the remote repository.
///
/// Acts as the manifest's lookup key. Uniqueness is not enforced on register;
/// deregistration removes the first entry with a matching name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteName(pub String);

impl fmt::Display for RemoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RemoteName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RemoteName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Manifest entry
// ---------------------------------------------------------------------------

/// One registered file: a remote name paired with the local path it mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path of the file in the remote repository tree.
    pub remote_name: RemoteName,
    /// Local path as registered — may start with `~`, expanded at use time
    /// via [`ManifestEntry::resolved_path`].
    pub local_path: PathBuf,
    /// When the entry was registered. Absent for lines written without one.
    pub registered_at: Option<DateTime<Utc>>,
}

impl ManifestEntry {
    /// Expand a leading `~` in `local_path` to the given home directory.
    ///
    /// Only `~` alone or a `~/…` prefix is expanded; `~user` forms and
    /// mid-path tildes pass through unchanged.
    pub fn resolved_path(&self, home: &Path) -> PathBuf {
        resolve_path(&self.local_path, home)
    }
}

/// `~` / `~/…` expansion against an explicit home directory.
pub fn resolve_path(path: &Path, home: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = s.strip_prefix("~/") {
        return home.join(rest);
    }
    path.to_path_buf()
}
