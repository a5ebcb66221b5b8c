//! Blocking GitHub client.
//!
//! [`GitData`] is the provider seam the sync pipeline runs against — the
//! content-addressed blob/tree/commit primitives plus a mutable branch
//! reference. [`GitHubClient`] implements it over `ureq` with one request per
//! call, no retries, and no timeout beyond the transport defaults.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::api::{
    CommitInfo, Contents, GitRef, NewBlob, NewCommit, NewFile, NewFileResponse, NewRepo, NewTree,
    RateLimit, RefUpdate, ShaOnly, TreeEntry,
};
use crate::error::RemoteError;

const DEFAULT_API_ROOT: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";

// ---------------------------------------------------------------------------
// 1. Provider seam
// ---------------------------------------------------------------------------

/// Git Data primitives of the hosting provider, scoped to one repository and
/// one branch.
pub trait GitData {
    /// Current head commit sha of the branch, or `None` when the branch does
    /// not exist yet (empty repository or unknown ref).
    fn branch_head(&self) -> Result<Option<String>, RemoteError>;

    /// Tree sha of the given commit.
    fn commit_tree_sha(&self, commit_sha: &str) -> Result<String, RemoteError>;

    /// Store raw bytes as a blob; returns the blob sha.
    fn create_blob(&self, content: &[u8]) -> Result<String, RemoteError>;

    /// Create a tree from `entries`, layered onto `base_tree` when given.
    fn create_tree(&self, base_tree: Option<&str>, entries: &[TreeEntry])
        -> Result<String, RemoteError>;

    /// Create a commit pointing at `tree_sha`; parentless when `parent` is `None`.
    fn create_commit(
        &self,
        tree_sha: &str,
        parent: Option<&str>,
        message: &str,
    ) -> Result<String, RemoteError>;

    /// Point the branch reference at `commit_sha`.
    fn update_ref(&self, commit_sha: &str, force: bool) -> Result<(), RemoteError>;

    /// Create a file on the branch through the contents API; returns the
    /// content sha. Creating a file on a branch that does not exist forces the
    /// provider to create the branch — used only by branch bootstrap.
    fn create_file(&self, path: &str, content: &[u8], message: &str)
        -> Result<String, RemoteError>;

    /// Decoded content of the file at `path` on the branch.
    ///
    /// Fails with [`RemoteError::NotAFile`] when the path resolves to a
    /// directory listing rather than a single file.
    fn fetch_file(&self, path: &str) -> Result<Vec<u8>, RemoteError>;
}

// ---------------------------------------------------------------------------
// 2. GitHub implementation
// ---------------------------------------------------------------------------

/// `ureq`-backed [`GitData`] implementation against the GitHub REST API.
pub struct GitHubClient {
    agent: ureq::Agent,
    api_root: String,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

impl GitHubClient {
    /// Client for `owner/repo`, branch `main`.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            agent: ureq::agent(),
            api_root: DEFAULT_API_ROOT.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: "main".to_string(),
            token: token.into(),
        }
    }

    /// Override the API root (test servers, GitHub Enterprise).
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }

    /// Override the target branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Create a new repository for the token's user (`auto_init` on, so the
    /// provider seeds the default branch) and return a client for it.
    pub fn create_repo(
        owner: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
        description: &str,
    ) -> Result<Self, RemoteError> {
        let client = Self::new(owner, name, token);
        let url = format!("{}/user/repos", client.api_root);
        let payload = NewRepo {
            name: client.repo.clone(),
            description: description.to_string(),
            auto_init: true,
        };
        log::debug!("POST {url}");
        client
            .decorate(client.agent.post(&url))
            .send_json(payload)
            .map_err(|e| map_http_err(&url, e))?;
        Ok(client)
    }

    /// Whether `owner/repo` exists and is visible to the token.
    pub fn repo_exists(&self) -> Result<bool, RemoteError> {
        let url = format!("{}/repos/{}/{}", self.api_root, self.owner, self.repo);
        log::debug!("GET {url}");
        match self.decorate(self.agent.get(&url)).call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::Status(404, _)) => Ok(false),
            Err(e) => Err(map_http_err(&url, e)),
        }
    }

    /// Current rate-limit window. Informational only — sync operations never
    /// consult it before issuing requests.
    pub fn rate_limit(&self) -> Result<RateLimit, RemoteError> {
        let url = format!("{}/rate_limit", self.api_root);
        let response = self.get(&url)?;
        into_json(&url, response)
    }

    /// Repository slug, `owner/repo`.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Branch this client operates on.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    // -- request plumbing ---------------------------------------------------

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_root, self.owner, self.repo, tail
        )
    }

    fn ref_url(&self) -> String {
        self.repo_url(&format!("git/refs/heads/{}", self.branch))
    }

    fn decorate(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("Accept", ACCEPT)
            .set("Authorization", &format!("token {}", self.token))
    }

    fn get(&self, url: &str) -> Result<ureq::Response, RemoteError> {
        log::debug!("GET {url}");
        self.decorate(self.agent.get(url))
            .call()
            .map_err(|e| map_http_err(url, e))
    }

    fn post_json<T: serde::Serialize>(
        &self,
        url: &str,
        payload: T,
    ) -> Result<ureq::Response, RemoteError> {
        log::debug!("POST {url}");
        self.decorate(self.agent.post(url))
            .send_json(payload)
            .map_err(|e| map_http_err(url, e))
    }
}

impl GitData for GitHubClient {
    fn branch_head(&self) -> Result<Option<String>, RemoteError> {
        let url = self.ref_url();
        log::debug!("GET {url}");
        match self.decorate(self.agent.get(&url)).call() {
            Ok(response) => {
                let git_ref: GitRef = into_json(&url, response)?;
                Ok(Some(git_ref.object.sha))
            }
            // 409: repository exists but has no commits. 404: no such ref.
            Err(ureq::Error::Status(409, _)) | Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(map_http_err(&url, e)),
        }
    }

    fn commit_tree_sha(&self, commit_sha: &str) -> Result<String, RemoteError> {
        let url = self.repo_url(&format!("commits/{commit_sha}"));
        let response = self.get(&url)?;
        let info: CommitInfo = into_json(&url, response)?;
        Ok(info.commit.tree.sha)
    }

    fn create_blob(&self, content: &[u8]) -> Result<String, RemoteError> {
        let url = self.repo_url("git/blobs");
        let payload = NewBlob::base64(BASE64.encode(content));
        let response = self.post_json(&url, payload)?;
        let created: ShaOnly = into_json(&url, response)?;
        Ok(created.sha)
    }

    fn create_tree(
        &self,
        base_tree: Option<&str>,
        entries: &[TreeEntry],
    ) -> Result<String, RemoteError> {
        let url = self.repo_url("git/trees");
        let payload = NewTree {
            base_tree: base_tree.map(str::to_string),
            tree: entries.to_vec(),
        };
        let response = self.post_json(&url, payload)?;
        let created: ShaOnly = into_json(&url, response)?;
        Ok(created.sha)
    }

    fn create_commit(
        &self,
        tree_sha: &str,
        parent: Option<&str>,
        message: &str,
    ) -> Result<String, RemoteError> {
        let url = self.repo_url("git/commits");
        let payload = NewCommit {
            message: message.to_string(),
            tree: tree_sha.to_string(),
            parents: parent.map(str::to_string).into_iter().collect(),
        };
        let response = self.post_json(&url, payload)?;
        let created: ShaOnly = into_json(&url, response)?;
        Ok(created.sha)
    }

    fn update_ref(&self, commit_sha: &str, force: bool) -> Result<(), RemoteError> {
        let url = self.ref_url();
        let payload = RefUpdate {
            sha: commit_sha.to_string(),
            force,
        };
        log::debug!("PATCH {url}");
        self.decorate(self.agent.request("PATCH", &url))
            .send_json(payload)
            .map_err(|e| map_http_err(&url, e))?;
        Ok(())
    }

    fn create_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<String, RemoteError> {
        let url = self.repo_url(&format!("contents/{path}"));
        let payload = NewFile {
            branch: self.branch.clone(),
            message: message.to_string(),
            content: BASE64.encode(content),
        };
        log::debug!("PUT {url}");
        let response = self
            .decorate(self.agent.put(&url))
            .send_json(payload)
            .map_err(|e| map_http_err(&url, e))?;
        let created: NewFileResponse = into_json(&url, response)?;
        Ok(created.content.sha)
    }

    fn fetch_file(&self, path: &str) -> Result<Vec<u8>, RemoteError> {
        let url = self.repo_url(&format!("contents/{path}?ref={}", self.branch));
        let response = self.get(&url)?;
        match into_json(&url, response)? {
            Contents::Directory(_) => Err(RemoteError::NotAFile {
                path: path.to_string(),
            }),
            Contents::File(file) => decode_content(&url, &file.content),
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Response plumbing
// ---------------------------------------------------------------------------

/// Map a `ureq` failure onto the error taxonomy: 401/403 → `Auth`,
/// 404 → `NotFound`, other statuses → `Api` with the raw body.
fn map_http_err(url: &str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            match status {
                401 | 403 => RemoteError::Auth { status, body },
                404 => RemoteError::NotFound {
                    url: url.to_string(),
                },
                _ => RemoteError::Api {
                    status,
                    url: url.to_string(),
                    body,
                },
            }
        }
        ureq::Error::Transport(transport) => RemoteError::Transport(transport.to_string()),
    }
}

fn into_json<T: serde::de::DeserializeOwned>(
    url: &str,
    response: ureq::Response,
) -> Result<T, RemoteError> {
    response.into_json().map_err(|e| RemoteError::BadResponse {
        url: url.to_string(),
        detail: e.to_string(),
    })
}

/// The contents API wraps base64 at 60 columns; strip whitespace before decoding.
fn decode_content(url: &str, encoded: &str) -> Result<Vec<u8>, RemoteError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64.decode(compact).map_err(|e| RemoteError::BadResponse {
        url: url.to_string(),
        detail: format!("invalid base64 content: {e}"),
    })
}
