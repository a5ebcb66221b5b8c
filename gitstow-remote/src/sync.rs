//! Manifest-driven sync operations.
//!
//! ## `upload_all` — commit build sequence
//!
//! 1. Blob per file → tree-entry list (mode `100644`).
//! 2. Read the branch head; bootstrap the branch when it has none.
//! 3. Read the head commit's tree sha.
//! 4. Create a new tree layered onto it.
//! 5. Create a commit with the old head as parent.
//! 6. Advance the branch reference.
//!
//! The chain is not atomic: the reference moves only in the final step, so any
//! earlier failure leaves the branch where it was. Blobs, trees, and commits
//! created before a failure stay unreferenced until the provider garbage
//! collects them. First failure aborts the remaining batch — there is no
//! partial-success reporting.

use std::path::{Path, PathBuf};

use gitstow_core::{Manifest, ManifestEntry, RemoteName, MANIFEST_HEADER};

use crate::api::{TreeEntry, EMPTY_TREE_SHA};
use crate::client::GitData;
use crate::error::{io_err, RemoteError};

/// Name under which the manifest placeholder lives in the remote tree.
pub const REMOTE_MANIFEST_PATH: &str = ".gitstow";

/// One file's transient sync state: remote name, resolved local path, content.
///
/// Fetched or read per operation; never persisted beyond the write-back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub remote_name: RemoteName,
    pub local_path: PathBuf,
    pub content: Vec<u8>,
}

// ---------------------------------------------------------------------------
// 1. Download path
// ---------------------------------------------------------------------------

/// Fetch every registered file's remote content, keyed by remote name and
/// paired with its local path resolved against `home`.
pub fn download_all(
    repo: &impl GitData,
    manifest: &Manifest,
    home: &Path,
) -> Result<Vec<FetchedFile>, RemoteError> {
    fetch_entries(repo, manifest.entries(), home)
}

/// `download_all` over an arbitrary entry list (e.g. a remote manifest).
pub fn fetch_entries(
    repo: &impl GitData,
    entries: &[ManifestEntry],
    home: &Path,
) -> Result<Vec<FetchedFile>, RemoteError> {
    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let content = repo.fetch_file(&entry.remote_name.0)?;
        log::info!("fetched {} ({} bytes)", entry.remote_name, content.len());
        files.push(FetchedFile {
            remote_name: entry.remote_name.clone(),
            local_path: entry.resolved_path(home),
            content,
        });
    }
    Ok(files)
}

/// Overwrite each local path with its fetched content.
///
/// Creates missing parent directories. No backup of prior local content is
/// taken; the first unwritable path aborts the batch.
pub fn write_local(files: &[FetchedFile]) -> Result<(), RemoteError> {
    for file in files {
        if let Some(parent) = file.local_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
        }
        std::fs::write(&file.local_path, &file.content)
            .map_err(|e| io_err(&file.local_path, e))?;
        log::info!("wrote {}", file.local_path.display());
    }
    Ok(())
}

/// Read a manifest stored on the remote and parse its entries.
pub fn fetch_remote_manifest(
    repo: &impl GitData,
    manifest_path: &str,
) -> Result<Vec<ManifestEntry>, RemoteError> {
    let bytes = repo.fetch_file(manifest_path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(Manifest::parse(&text, Path::new(manifest_path))?)
}

// ---------------------------------------------------------------------------
// 2. Upload path
// ---------------------------------------------------------------------------

/// Read every registered file from the local filesystem, ready for upload.
pub fn read_local(manifest: &Manifest, home: &Path) -> Result<Vec<FetchedFile>, RemoteError> {
    let mut files = Vec::with_capacity(manifest.entries().len());
    for entry in manifest.entries() {
        let path = entry.resolved_path(home);
        let content = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        files.push(FetchedFile {
            remote_name: entry.remote_name.clone(),
            local_path: path,
            content,
        });
    }
    Ok(files)
}

/// Build one commit containing a blob for each file and advance the branch.
///
/// Entries for files no longer registered are NOT removed from the tree —
/// the new tree is layered onto the branch's current tree.
///
/// An empty file set creates no commit: the current head (bootstrapped first
/// when the branch has none) is returned unchanged.
///
/// Returns the new commit sha.
pub fn upload_all(
    repo: &impl GitData,
    files: &[FetchedFile],
    message: &str,
) -> Result<String, RemoteError> {
    if files.is_empty() {
        return match repo.branch_head()? {
            Some(head) => Ok(head),
            None => bootstrap_branch(repo),
        };
    }

    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let blob_sha = repo.create_blob(&file.content)?;
        log::info!("blob {} ← {}", blob_sha, file.remote_name);
        entries.push(TreeEntry::blob(file.remote_name.0.clone(), blob_sha));
    }

    let head = match repo.branch_head()? {
        Some(sha) => sha,
        None => bootstrap_branch(repo)?,
    };

    let base_tree = repo.commit_tree_sha(&head)?;
    let new_tree = repo.create_tree(Some(&base_tree), &entries)?;
    let commit = repo.create_commit(&new_tree, Some(&head), message)?;
    repo.update_ref(&commit, false)?;
    log::info!("branch advanced to {commit}");
    Ok(commit)
}

/// Bring up a branch on a repository that has none.
///
/// Creating a file through the contents API forces the provider to create the
/// branch; the branch is then rewound onto a parentless commit of the
/// well-known empty tree, so history starts with exactly one root commit.
///
/// Returns the root commit sha.
pub fn bootstrap_branch(repo: &impl GitData) -> Result<String, RemoteError> {
    let placeholder = format!("{MANIFEST_HEADER}\n");
    repo.create_file(REMOTE_MANIFEST_PATH, placeholder.as_bytes(), "initialize branch")?;
    let root = repo.create_commit(EMPTY_TREE_SHA, None, "initial commit")?;
    // Rewinding from the auto-created file commit onto the root commit is not
    // a fast-forward; the reference update must be forced.
    repo.update_ref(&root, true)?;
    log::info!("bootstrapped branch at {root}");
    Ok(root)
}
