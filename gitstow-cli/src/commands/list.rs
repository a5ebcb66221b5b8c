//! `gitstow list` — show registered files.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::ManifestArg;

/// List registered files.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub manifest: ManifestArg,
}

#[derive(Tabled)]
struct ListTableRow {
    #[tabled(rename = "remote name")]
    remote_name: String,
    #[tabled(rename = "local path")]
    local_path: String,
    #[tabled(rename = "registered")]
    registered: String,
}

#[derive(Serialize)]
struct ListEntryJson {
    remote_name: String,
    local_path: String,
    registered_at: Option<String>,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let manifest = self.manifest.load()?;

        if self.json {
            let entries: Vec<ListEntryJson> = manifest
                .entries()
                .iter()
                .map(|e| ListEntryJson {
                    remote_name: e.remote_name.0.clone(),
                    local_path: e.local_path.display().to_string(),
                    registered_at: e.registered_at.map(|dt| dt.to_rfc3339()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if manifest.entries().is_empty() {
            println!("No files registered.");
            println!("Run: gitstow register <remote-name> <local-path>");
            return Ok(());
        }

        let rows: Vec<ListTableRow> = manifest
            .entries()
            .iter()
            .map(|e| ListTableRow {
                remote_name: e.remote_name.0.clone(),
                local_path: e.local_path.display().to_string(),
                registered: e
                    .registered_at
                    .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
