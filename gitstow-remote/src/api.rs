//! Request/response payload types for the GitHub Git Data and Contents APIs.
//!
//! One explicit struct per endpoint payload — field names match the wire
//! format, so everything here is plain serde derive with no custom impls.

use serde::{Deserialize, Serialize};

/// Blob mode for a regular (non-executable) file.
pub const FILE_MODE: &str = "100644";

/// Tree-entry mode for a sub-tree.
pub const DIR_MODE: &str = "040000";

/// Sha of the well-known empty tree, present in every repository.
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

// ---------------------------------------------------------------------------
// Git Data: blobs, trees, commits, refs
// ---------------------------------------------------------------------------

/// `POST /repos/{owner}/{repo}/git/blobs`
#[derive(Debug, Serialize)]
pub struct NewBlob {
    /// Base64-encoded file content.
    pub content: String,
    pub encoding: &'static str,
}

impl NewBlob {
    pub fn base64(content: String) -> Self {
        Self {
            content,
            encoding: "base64",
        }
    }
}

/// Create responses for blobs, trees, and commits all reduce to a sha.
#[derive(Debug, Deserialize)]
pub struct ShaOnly {
    pub sha: String,
}

/// One entry of a tree create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub sha: String,
}

impl TreeEntry {
    /// A regular-file blob entry.
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: FILE_MODE.to_string(),
            entry_type: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// `POST /repos/{owner}/{repo}/git/trees`
#[derive(Debug, Serialize)]
pub struct NewTree {
    /// Tree to layer the new entries onto; omitted when building from scratch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_tree: Option<String>,
    pub tree: Vec<TreeEntry>,
}

/// `POST /repos/{owner}/{repo}/git/commits`
#[derive(Debug, Serialize)]
pub struct NewCommit {
    pub message: String,
    pub tree: String,
    /// Empty for a parentless (root) commit — omitted from the payload.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

/// `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`
#[derive(Debug, Serialize)]
pub struct RefUpdate {
    pub sha: String,
    pub force: bool,
}

/// `GET /repos/{owner}/{repo}/git/refs/heads/{branch}`
#[derive(Debug, Deserialize)]
pub struct GitRef {
    pub object: RefObject,
}

#[derive(Debug, Deserialize)]
pub struct RefObject {
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/commits/{sha}` — only the tree pointer is used.
#[derive(Debug, Deserialize)]
pub struct CommitInfo {
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub tree: CommitTree,
}

#[derive(Debug, Deserialize)]
pub struct CommitTree {
    pub sha: String,
}

// ---------------------------------------------------------------------------
// Contents API
// ---------------------------------------------------------------------------

/// `GET /repos/{owner}/{repo}/contents/{path}` — a single file comes back as
/// an object, a directory as an array of entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Directory(Vec<ContentsEntry>),
    File(ContentsFile),
}

#[derive(Debug, Deserialize)]
pub struct ContentsFile {
    pub sha: String,
    /// Base64 content, wrapped in newlines by the provider.
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentsEntry {
    pub path: String,
    pub sha: String,
}

/// `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Serialize)]
pub struct NewFile {
    pub branch: String,
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
}

/// Response of a contents PUT — only the created content sha is used.
#[derive(Debug, Deserialize)]
pub struct NewFileResponse {
    pub content: ShaOnly,
}

// ---------------------------------------------------------------------------
// Repository / rate limit
// ---------------------------------------------------------------------------

/// `POST /user/repos`
#[derive(Debug, Serialize)]
pub struct NewRepo {
    pub name: String,
    pub description: String,
    pub auto_init: bool,
}

/// `GET /rate_limit` — read-only visibility, never consulted before requests.
#[derive(Debug, Deserialize)]
pub struct RateLimit {
    pub rate: Rate,
}

#[derive(Debug, Deserialize)]
pub struct Rate {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp at which the window resets.
    pub reset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_entry_serializes_type_field() {
        let entry = TreeEntry::blob("notes.txt", "abc123");
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(json["type"], "blob");
        assert_eq!(json["mode"], FILE_MODE);
        assert_eq!(json["path"], "notes.txt");
    }

    #[test]
    fn root_commit_omits_parents() {
        let commit = NewCommit {
            message: "initial".to_string(),
            tree: EMPTY_TREE_SHA.to_string(),
            parents: vec![],
        };
        let json = serde_json::to_value(&commit).expect("serialize");
        assert!(json.get("parents").is_none());
    }

    #[test]
    fn tree_without_base_omits_base_tree() {
        let tree = NewTree {
            base_tree: None,
            tree: vec![TreeEntry::blob("a", "sha")],
        };
        let json = serde_json::to_value(&tree).expect("serialize");
        assert!(json.get("base_tree").is_none());
    }

    #[test]
    fn contents_array_parses_as_directory() {
        let json = r#"[{"path": "dir/a.txt", "sha": "s1"}, {"path": "dir/b.txt", "sha": "s2"}]"#;
        let contents: Contents = serde_json::from_str(json).expect("parse");
        assert!(matches!(contents, Contents::Directory(ref v) if v.len() == 2));
    }

    #[test]
    fn contents_object_parses_as_file() {
        let json = r#"{"sha": "s1", "content": "aGVsbG8=\n"}"#;
        let contents: Contents = serde_json::from_str(json).expect("parse");
        assert!(matches!(contents, Contents::File(ref f) if f.sha == "s1"));
    }
}
