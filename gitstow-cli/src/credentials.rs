//! Access-token file: single line `TOKEN=<value>` at `~/.gitstow/token`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// `<home>/.gitstow/token` — pure, no I/O.
pub fn token_path_at(home: &Path) -> PathBuf {
    home.join(".gitstow").join("token")
}

/// Read and decode the token from an explicit home directory.
pub fn read_token_at(home: &Path) -> Result<String> {
    let path = token_path_at(home);
    let contents = std::fs::read_to_string(&path).with_context(|| {
        format!(
            "no token at {} — run `gitstow token set <value>` first",
            path.display()
        )
    })?;
    let line = contents.lines().next().unwrap_or_default();
    let token = line.rsplit('=').next().unwrap_or_default().trim();
    if token.is_empty() {
        anyhow::bail!("token file {} is empty or malformed", path.display());
    }
    Ok(token.to_string())
}

/// `read_token_at` convenience wrapper.
pub fn read_token() -> Result<String> {
    read_token_at(&home()?)
}

/// Write `TOKEN=<value>` to an explicit home directory, mode 0600.
pub fn write_token_at(home: &Path, token: &str) -> Result<()> {
    let path = token_path_at(home);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
        set_permissions(parent, 0o700)?;
    }
    std::fs::write(&path, format!("TOKEN={token}"))
        .with_context(|| format!("cannot write {}", path.display()))?;
    set_permissions(&path, 0o600)?;
    Ok(())
}

/// `write_token_at` convenience wrapper.
pub fn write_token(token: &str) -> Result<()> {
    write_token_at(&home()?, token)
}

fn home() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("cannot chmod {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
