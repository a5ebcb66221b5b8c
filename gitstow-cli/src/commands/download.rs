//! `gitstow download` — fetch registered files and overwrite local copies.

use anyhow::{Context, Result};
use clap::Args;
use gitstow_remote::sync::{self, REMOTE_MANIFEST_PATH};
use gitstow_remote::write_local;

use super::{sync_home, ConnectArgs, ManifestArg};

/// Fetch every registered file from the branch and overwrite local copies.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Drive the file set from the manifest stored on the remote (`.gitstow`)
    /// instead of the local one.
    #[arg(long)]
    pub from_remote_manifest: bool,

    #[command(flatten)]
    pub manifest: ManifestArg,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

impl DownloadArgs {
    pub fn run(self) -> Result<()> {
        let home = sync_home()?;
        let client = self.connect.client()?;

        let entries = if self.from_remote_manifest {
            sync::fetch_remote_manifest(&client, REMOTE_MANIFEST_PATH)
                .with_context(|| format!("failed to fetch remote manifest from {}", client.slug()))?
        } else {
            self.manifest.load()?.entries().to_vec()
        };

        if entries.is_empty() {
            println!("No files registered — nothing to download.");
            return Ok(());
        }

        let files = sync::fetch_entries(&client, &entries, &home)
            .with_context(|| format!("download from {} failed", client.slug()))?;
        write_local(&files).context("failed to write local files")?;

        println!("✓ Downloaded {} file(s) from {}", files.len(), client.slug());
        for file in &files {
            println!("  ✎  {}", file.local_path.display());
        }
        Ok(())
    }
}
