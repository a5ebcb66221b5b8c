//! Gitstow — mirror registered local files to a GitHub branch.
//!
//! # Usage
//!
//! ```text
//! gitstow register <remote-name> <local-path>
//! gitstow deregister <remote-name>
//! gitstow list [--json]
//! gitstow upload [--message <m>] [--with-manifest] --owner <o> --repo <r>
//! gitstow download [--from-remote-manifest] --owner <o> --repo <r>
//! gitstow repo create <name> [--description <d>]
//! gitstow token set <value> | show
//! gitstow status --owner <o> --repo <r>
//! ```
//!
//! Owner/repo/token may also come from `GITSTOW_OWNER`, `GITSTOW_REPO`, and
//! `GITSTOW_TOKEN`; the token otherwise falls back to `~/.gitstow/token`.

mod commands;
mod credentials;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    download::DownloadArgs, list::ListArgs, register::DeregisterArgs, register::RegisterArgs,
    repo::RepoCommand, status::StatusArgs, token::TokenCommand, upload::UploadArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "gitstow",
    version,
    about = "Mirror a registered set of local files to and from a GitHub branch",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a local file under a remote name.
    Register(RegisterArgs),

    /// Remove the first manifest entry with the given remote name.
    Deregister(DeregisterArgs),

    /// List registered files.
    List(ListArgs),

    /// Push every registered file to the branch as one commit.
    Upload(UploadArgs),

    /// Fetch every registered file from the branch and overwrite local copies.
    Download(DownloadArgs),

    /// Manage the remote repository.
    Repo {
        #[command(subcommand)]
        command: RepoCommand,
    },

    /// Manage the stored access token.
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },

    /// Check the connection and show the API rate-limit window.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Register(args) => args.run(),
        Commands::Deregister(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Upload(args) => args.run(),
        Commands::Download(args) => args.run(),
        Commands::Repo { command } => commands::repo::run(command),
        Commands::Token { command } => commands::token::run(command),
        Commands::Status(args) => args.run(),
    }
}
