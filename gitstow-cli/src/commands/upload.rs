//! `gitstow upload` — push every registered file to the branch as one commit.

use anyhow::{Context, Result};
use clap::Args;
use gitstow_core::RemoteName;
use gitstow_remote::sync::REMOTE_MANIFEST_PATH;
use gitstow_remote::{read_local, upload_all, FetchedFile};

use super::{sync_home, ConnectArgs, ManifestArg};

/// Push every registered file to the branch as one commit.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Commit message. Defaults to a timestamped gitstow message.
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Also upload the manifest itself as `.gitstow`, so downloads can be
    /// driven from the remote copy.
    #[arg(long)]
    pub with_manifest: bool,

    #[command(flatten)]
    pub manifest: ManifestArg,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

impl UploadArgs {
    pub fn run(self) -> Result<()> {
        let home = sync_home()?;
        let manifest = self.manifest.load()?;
        if manifest.entries().is_empty() {
            println!("No files registered — nothing to upload.");
            return Ok(());
        }

        let mut files = read_local(&manifest, &home).context("failed to read local files")?;
        if self.with_manifest {
            let content = std::fs::read(manifest.path()).with_context(|| {
                format!("failed to read manifest at {}", manifest.path().display())
            })?;
            files.push(FetchedFile {
                remote_name: RemoteName::from(REMOTE_MANIFEST_PATH),
                local_path: manifest.path().to_path_buf(),
                content,
            });
        }

        let client = self.connect.client()?;
        let message = self.message.unwrap_or_else(|| {
            format!("gitstow sync {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
        });
        let commit = upload_all(&client, &files, &message)
            .with_context(|| format!("upload to {} failed", client.slug()))?;

        println!(
            "✓ Uploaded {} file(s) to {} ({})",
            files.len(),
            client.slug(),
            client.branch()
        );
        println!("  commit {commit}");
        Ok(())
    }
}
