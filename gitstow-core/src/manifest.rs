//! Line-oriented manifest store.
//!
//! # Wire format
//!
//! ```text
//! [FILES]
//! notes.txt -> ~/notes.txt - 2024-11-02T09:14:00+00:00
//! vimrc -> ~/.vimrc -
//! ```
//!
//! The first line is a fixed sentinel header, never treated as data. Each
//! subsequent non-blank line is whitespace-separated; the parser takes
//! positional fields 0 (remote name) and 2 (local path), and field 4 — when
//! present — as an RFC 3339 registration timestamp.
//!
//! # API pattern
//!
//! Mutating state lives in an explicit [`Manifest`] object: load once, mutate
//! in memory, [`Manifest::save`] explicitly. Loaders come in two forms:
//! - `load_at(path)` — explicit path; used in tests with `TempDir`
//! - `load()` — derives `<home>/.gitstow/manifest` from `dirs::home_dir()`
//!
//! Tests must NEVER call the no-arg wrapper; always use `load_at`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{io_err, ManifestError};
use crate::types::{ManifestEntry, RemoteName};

/// Sentinel first line of every manifest file.
pub const MANIFEST_HEADER: &str = "[FILES]";

/// Default manifest location relative to the home directory.
const DEFAULT_RELATIVE_PATH: &str = ".gitstow/manifest";

// ---------------------------------------------------------------------------
// 1. Store
// ---------------------------------------------------------------------------

/// In-memory manifest bound to its backing file.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load the manifest at an explicit path.
    ///
    /// A missing file yields an empty manifest bound to that path (the file is
    /// created on first [`Manifest::save`]). An existing file must start with
    /// the `[FILES]` sentinel.
    pub fn load_at(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: Vec::new(),
            });
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let entries = Self::parse(&contents, &path)?;
        Ok(Self { path, entries })
    }

    /// `load_at` convenience wrapper — uses `<home>/.gitstow/manifest`.
    pub fn load() -> Result<Self, ManifestError> {
        Self::load_at(default_path_at(&home()?))
    }

    /// Parse manifest text into entries.
    ///
    /// Shared by [`Manifest::load_at`] and by callers that fetch a manifest
    /// stored on the remote. `path` is used only for error context.
    pub fn parse(text: &str, path: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
        let mut lines = text.lines();
        match lines.next() {
            Some(first) if first.trim() == MANIFEST_HEADER => {}
            _ => {
                return Err(ManifestError::MissingHeader {
                    path: path.to_path_buf(),
                })
            }
        }

        let mut entries = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                return Err(ManifestError::MalformedEntry {
                    path: path.to_path_buf(),
                    line: line.to_string(),
                });
            }
            let registered_at = fields
                .get(4)
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|dt| dt.with_timezone(&Utc));
            entries.push(ManifestEntry {
                remote_name: RemoteName::from(fields[0]),
                local_path: PathBuf::from(fields[2]),
                registered_at,
            });
        }
        Ok(entries)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All registered entries, in registration order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Append an entry stamped with the current time.
    ///
    /// The wire format splits lines on whitespace, so remote names and local
    /// paths containing whitespace are rejected here rather than silently
    /// truncated on the next load.
    ///
    /// Duplicate remote names are allowed; deregistration later removes only
    /// the first match.
    pub fn register(
        &mut self,
        remote_name: RemoteName,
        local_path: PathBuf,
    ) -> Result<(), ManifestError> {
        if remote_name.0.chars().any(char::is_whitespace) {
            return Err(ManifestError::WhitespaceInField {
                what: "remote name",
                value: remote_name.0,
            });
        }
        let path_str = local_path.to_string_lossy();
        if path_str.chars().any(char::is_whitespace) {
            return Err(ManifestError::WhitespaceInField {
                what: "local path",
                value: path_str.into_owned(),
            });
        }
        self.entries.push(ManifestEntry {
            remote_name,
            local_path,
            registered_at: Some(Utc::now()),
        });
        Ok(())
    }

    /// Remove the first entry whose remote name matches exactly.
    ///
    /// Returns `false` (silent no-op) when no entry matches.
    pub fn deregister(&mut self, remote_name: &RemoteName) -> bool {
        match self.entries.iter().position(|e| &e.remote_name == remote_name) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Atomically save the manifest to its backing file.
    ///
    /// Write flow: render → `.tmp` sibling → `chmod 0600` → `rename`.
    /// The `.tmp` is always in the same directory as the target (same
    /// filesystem — no EXDEV). Creates the parent directory (mode `0700`)
    /// when absent.
    pub fn save(&self) -> Result<(), ManifestError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
                set_dir_permissions(parent)?;
            }
        }

        let mut out = String::from(MANIFEST_HEADER);
        out.push('\n');
        for entry in &self.entries {
            let ts = entry
                .registered_at
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();
            out.push_str(&format!(
                "{} -> {} - {}\n",
                entry.remote_name,
                entry.local_path.display(),
                ts
            ));
        }

        let tmp = tmp_path(&self.path);
        std::fs::write(&tmp, out).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.gitstow/manifest` — pure, no I/O.
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(DEFAULT_RELATIVE_PATH)
}

fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string());
    path.with_file_name(format!("{name}.tmp"))
}

fn home() -> Result<PathBuf, ManifestError> {
    dirs::home_dir().ok_or(ManifestError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Private permission helpers
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ManifestError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ManifestError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ManifestError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ManifestError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest_in(dir: &TempDir) -> Manifest {
        Manifest::load_at(dir.path().join("manifest")).expect("load")
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().expect("tempdir");
        let m = manifest_in(&dir);
        assert!(m.entries().is_empty());
    }

    #[test]
    fn register_save_load_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let mut m = manifest_in(&dir);
        m.register(RemoteName::from("notes.txt"), PathBuf::from("~/notes.txt")).expect("register");
        m.save().expect("save");

        let reloaded = manifest_in(&dir);
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].remote_name, RemoteName::from("notes.txt"));
        assert_eq!(reloaded.entries()[0].local_path, PathBuf::from("~/notes.txt"));
        assert!(reloaded.entries()[0].registered_at.is_some());
    }

    #[test]
    fn saved_file_starts_with_header() {
        let dir = TempDir::new().expect("tempdir");
        let mut m = manifest_in(&dir);
        m.register(RemoteName::from("a"), PathBuf::from("/a")).expect("register");
        m.save().expect("save");

        let text = std::fs::read_to_string(dir.path().join("manifest")).expect("read");
        assert!(text.starts_with(MANIFEST_HEADER));
    }

    #[test]
    fn parse_takes_fields_zero_and_two() {
        let entries = Manifest::parse(
            "[FILES]\nnotes.txt -> ~/notes.txt - 2024-11-02T09:14:00+00:00\n",
            Path::new("test"),
        )
        .expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].remote_name, RemoteName::from("notes.txt"));
        assert_eq!(entries[0].local_path, PathBuf::from("~/notes.txt"));
        assert!(entries[0].registered_at.is_some());
    }

    #[test]
    fn parse_tolerates_missing_timestamp() {
        let entries =
            Manifest::parse("[FILES]\nvimrc -> ~/.vimrc -\n", Path::new("test")).expect("parse");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].registered_at.is_none());
    }

    #[test]
    fn parse_skips_blank_lines() {
        let entries = Manifest::parse(
            "[FILES]\n\na -> /a - \n\nb -> /b - \n",
            Path::new("test"),
        )
        .expect("parse");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn parse_rejects_missing_header() {
        let err = Manifest::parse("a -> /a - \n", Path::new("test")).unwrap_err();
        assert!(matches!(err, ManifestError::MissingHeader { .. }), "got: {err}");
    }

    #[test]
    fn parse_rejects_short_line() {
        let err = Manifest::parse("[FILES]\nnotes.txt ->\n", Path::new("test")).unwrap_err();
        assert!(matches!(err, ManifestError::MalformedEntry { .. }), "got: {err}");
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn register_rejects_remote_name_with_whitespace() {
        let dir = TempDir::new().expect("tempdir");
        let mut m = manifest_in(&dir);
        let err = m
            .register(RemoteName::from("my notes"), PathBuf::from("/notes"))
            .unwrap_err();
        assert!(matches!(err, ManifestError::WhitespaceInField { .. }), "got: {err}");
        assert!(m.entries().is_empty());
    }

    #[test]
    fn register_rejects_local_path_with_whitespace() {
        let dir = TempDir::new().expect("tempdir");
        let mut m = manifest_in(&dir);
        let err = m
            .register(
                RemoteName::from("notes.txt"),
                PathBuf::from("~/My Documents/notes.txt"),
            )
            .unwrap_err();
        assert!(matches!(err, ManifestError::WhitespaceInField { .. }), "got: {err}");
        assert!(err.to_string().contains("My Documents"));
        assert!(m.entries().is_empty());
    }

    #[test]
    fn deregister_removes_first_match_only() {
        let dir = TempDir::new().expect("tempdir");
        let mut m = manifest_in(&dir);
        m.register(RemoteName::from("dup"), PathBuf::from("/first")).expect("register");
        m.register(RemoteName::from("dup"), PathBuf::from("/second")).expect("register");

        assert!(m.deregister(&RemoteName::from("dup")));
        assert_eq!(m.entries().len(), 1);
        assert_eq!(m.entries()[0].local_path, PathBuf::from("/second"));
    }

    #[test]
    fn deregister_missing_name_is_a_no_op() {
        let dir = TempDir::new().expect("tempdir");
        let mut m = manifest_in(&dir);
        m.register(RemoteName::from("a"), PathBuf::from("/a")).expect("register");
        assert!(!m.deregister(&RemoteName::from("zzz")));
        assert_eq!(m.entries().len(), 1);
    }
}
