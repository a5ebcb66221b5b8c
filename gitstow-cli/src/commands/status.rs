//! `gitstow status` — connection check and rate-limit visibility.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::Args;
use colored::Colorize;

use super::ConnectArgs;

/// Check the connection and show the API rate-limit window.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let client = self.connect.client()?;

        let exists = client
            .repo_exists()
            .with_context(|| format!("connection check for {} failed", client.slug()))?;
        if exists {
            println!("{} {}", "✓".green(), format!("connected to {}", client.slug()).bold());
        } else {
            println!("{} repository {} does not exist", "✗".red(), client.slug());
            println!("  Run: gitstow repo create {}", client.slug());
            return Ok(());
        }

        let limits = client.rate_limit().context("rate-limit check failed")?;
        let reset = Utc
            .timestamp_opt(limits.rate.reset, 0)
            .single()
            .map(|dt| dt.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let remaining = if limits.rate.remaining * 10 < limits.rate.limit {
            limits.rate.remaining.to_string().red().to_string()
        } else {
            limits.rate.remaining.to_string().green().to_string()
        };
        println!(
            "  rate limit: {remaining}/{} remaining (resets {reset})",
            limits.rate.limit
        );
        Ok(())
    }
}
