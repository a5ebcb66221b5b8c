//! `gitstow register <remote-name> <local-path>` and `gitstow deregister <remote-name>`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gitstow_core::RemoteName;

use super::ManifestArg;

/// Register a local file under a remote name.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Name the file will have in the remote repository tree.
    pub remote_name: String,

    /// Local path to mirror. May start with `~`, expanded at sync time.
    pub local_path: PathBuf,

    #[command(flatten)]
    pub manifest: ManifestArg,
}

impl RegisterArgs {
    pub fn run(self) -> Result<()> {
        let mut manifest = self.manifest.load()?;
        manifest
            .register(RemoteName::from(self.remote_name.clone()), self.local_path.clone())
            .with_context(|| format!("cannot register '{}'", self.remote_name))?;
        manifest
            .save()
            .with_context(|| format!("failed to register '{}'", self.remote_name))?;
        println!("✓ Registered '{}' -> {}", self.remote_name, self.local_path.display());
        Ok(())
    }
}

/// Remove the first manifest entry with the given remote name.
#[derive(Args, Debug)]
pub struct DeregisterArgs {
    /// Remote name to deregister.
    pub remote_name: String,

    #[command(flatten)]
    pub manifest: ManifestArg,
}

impl DeregisterArgs {
    pub fn run(self) -> Result<()> {
        let mut manifest = self.manifest.load()?;
        let removed = manifest.deregister(&RemoteName::from(self.remote_name.clone()));
        if removed {
            manifest
                .save()
                .with_context(|| format!("failed to deregister '{}'", self.remote_name))?;
            println!("✓ Deregistered '{}'", self.remote_name);
        } else {
            println!("'{}' was not registered — nothing to do", self.remote_name);
        }
        Ok(())
    }
}
