//! One module per subcommand, plus the shared connection/manifest plumbing.

pub mod download;
pub mod list;
pub mod register;
pub mod repo;
pub mod status;
pub mod token;
pub mod upload;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gitstow_core::Manifest;
use gitstow_remote::GitHubClient;

use crate::credentials;

/// Connection arguments shared by every command that talks to the remote.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// GitHub account that owns the repository.
    #[arg(long, env = "GITSTOW_OWNER")]
    pub owner: String,

    /// Repository name.
    #[arg(long, env = "GITSTOW_REPO")]
    pub repo: String,

    /// Access token. Falls back to ~/.gitstow/token when omitted.
    #[arg(long, env = "GITSTOW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Branch to sync against.
    #[arg(long, default_value = "main")]
    pub branch: String,
}

impl ConnectArgs {
    pub fn client(&self) -> Result<GitHubClient> {
        let token = match &self.token {
            Some(t) => t.clone(),
            None => credentials::read_token()?,
        };
        Ok(GitHubClient::new(&self.owner, &self.repo, token).with_branch(&self.branch))
    }
}

/// Manifest location override shared by manifest-touching commands.
#[derive(Args, Debug)]
pub struct ManifestArg {
    /// Manifest file to use instead of ~/.gitstow/manifest.
    #[arg(long, env = "GITSTOW_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

impl ManifestArg {
    pub fn load(&self) -> Result<Manifest> {
        match &self.manifest {
            Some(path) => Manifest::load_at(path)
                .with_context(|| format!("failed to load manifest at {}", path.display())),
            None => Manifest::load().context("failed to load manifest"),
        }
    }
}

/// Home directory used for `~` expansion of registered paths.
pub fn sync_home() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}
