//! `gitstow token set <value>` and `gitstow token show`.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::credentials;

/// Manage the stored access token.
#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Store an access token in ~/.gitstow/token (mode 0600).
    Set(SetArgs),

    /// Show the stored token, masked.
    Show,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// The access token value.
    pub value: String,
}

pub fn run(cmd: TokenCommand) -> Result<()> {
    match cmd {
        TokenCommand::Set(args) => set(args),
        TokenCommand::Show => show(),
    }
}

fn set(args: SetArgs) -> Result<()> {
    credentials::write_token(&args.value)?;
    println!("✓ Access token updated");
    Ok(())
}

fn show() -> Result<()> {
    let token = credentials::read_token()?;
    println!("{}", mask(&token));
    Ok(())
}

/// Keep a short identifying prefix, hide the rest.
fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{visible}{}", "*".repeat(token.chars().count().saturating_sub(4)))
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn mask_keeps_only_a_prefix() {
        assert_eq!(mask("ghp_s3cr3t"), "ghp_******");
    }

    #[test]
    fn mask_handles_short_tokens() {
        assert_eq!(mask("ab"), "ab");
    }
}
