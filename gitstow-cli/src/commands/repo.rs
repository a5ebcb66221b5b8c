//! `gitstow repo create <name>` — create the remote repository.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use gitstow_remote::GitHubClient;

use crate::credentials;

/// Manage the remote repository.
#[derive(Subcommand, Debug)]
pub enum RepoCommand {
    /// Create a new repository for the token's user (auto-initialized).
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the repository to create.
    pub name: String,

    /// Repository description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// GitHub account the repository will belong to.
    #[arg(long, env = "GITSTOW_OWNER")]
    pub owner: String,

    /// Access token. Falls back to ~/.gitstow/token when omitted.
    #[arg(long, env = "GITSTOW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

pub fn run(cmd: RepoCommand) -> Result<()> {
    match cmd {
        RepoCommand::Create(args) => create(args),
    }
}

fn create(args: CreateArgs) -> Result<()> {
    let token = match args.token {
        Some(t) => t,
        None => credentials::read_token()?,
    };
    let client = GitHubClient::create_repo(&args.owner, &args.name, token, &args.description)
        .with_context(|| format!("failed to create repository '{}'", args.name))?;
    println!("✓ Created repository {}", client.slug());
    Ok(())
}
