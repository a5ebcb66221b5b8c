//! Manifest error-message, atomic-write-safety, and lifecycle integration tests.

use assert_fs::prelude::*;
use gitstow_core::{Manifest, ManifestError, RemoteName};
use predicates::prelude::predicate;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;

fn load(home: &assert_fs::TempDir) -> Manifest {
    Manifest::load_at(home.path().join(".gitstow").join("manifest")).expect("load")
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_headerless_file_reports_missing_header_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child(".gitstow/manifest");
    file.write_str("notes.txt -> ~/notes.txt - \n").expect("write");

    let err = Manifest::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::MissingHeader { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("[FILES]"), "must name the sentinel, got: {msg}");
    assert!(msg.contains("manifest"), "must contain file path, got: {msg}");
}

#[test]
fn load_truncated_entry_reports_the_offending_line() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child(".gitstow/manifest");
    file.write_str("[FILES]\nnotes.txt ->\n").expect("write");

    let err = Manifest::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::MalformedEntry { .. }), "got: {err}");
    assert!(err.to_string().contains("notes.txt ->"));
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn save_cleans_up_tmp_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    m.register(RemoteName::from("a"), PathBuf::from("/a")).expect("register");
    m.save().expect("save");

    let tmp = home.path().join(".gitstow").join("manifest.tmp");
    assert!(!tmp.exists(), ".tmp must be removed after successful save");
    home.child(".gitstow/manifest")
        .assert(predicate::path::exists());
}

#[test]
fn mid_write_crash_leaves_original_intact() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    m.register(RemoteName::from("a"), PathBuf::from("/a")).expect("register");
    m.save().expect("save");

    let path = home.path().join(".gitstow").join("manifest");
    let original_bytes = fs::read(&path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = home.path().join(".gitstow").join("manifest.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(&path).expect("read after crash");
    assert_eq!(original_bytes, current_bytes, "original must be unchanged after crash");
    assert!(tmp.exists(), ".tmp orphan must exist (crash = no cleanup)");
}

#[cfg(unix)]
#[test]
fn saved_manifest_is_owner_readable_only() {
    use std::os::unix::fs::PermissionsExt;

    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    m.register(RemoteName::from("a"), PathBuf::from("/a")).expect("register");
    m.save().expect("save");

    let meta = fs::metadata(home.path().join(".gitstow").join("manifest")).expect("metadata");
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
}

// ---------------------------------------------------------------------------
// 3. Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn deregister_middle_entry_preserves_relative_order() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    m.register(RemoteName::from("a"), PathBuf::from("/a")).expect("register");
    m.register(RemoteName::from("b"), PathBuf::from("/b")).expect("register");
    m.register(RemoteName::from("c"), PathBuf::from("/c")).expect("register");
    assert!(m.deregister(&RemoteName::from("b")));
    m.save().expect("save");

    let reloaded = load(&home);
    let names: Vec<String> = reloaded
        .entries()
        .iter()
        .map(|e| e.remote_name.0.clone())
        .collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn register_twice_deregister_once_leaves_one_stale_duplicate() {
    // Documents first-match-wins: duplicate registration is allowed and a
    // single deregister leaves the later duplicate behind.
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    m.register(RemoteName::from("dup"), PathBuf::from("/one")).expect("register");
    m.register(RemoteName::from("dup"), PathBuf::from("/two")).expect("register");
    assert!(m.deregister(&RemoteName::from("dup")));
    m.save().expect("save");

    let reloaded = load(&home);
    assert_eq!(reloaded.entries().len(), 1);
    assert_eq!(reloaded.entries()[0].local_path, PathBuf::from("/two"));
}

#[test]
fn path_with_space_is_rejected_instead_of_truncated_on_reload() {
    // The line format splits on whitespace, so a stored path containing a
    // space would come back as its first word. Registration must refuse it
    // up front.
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    let err = m
        .register(
            RemoteName::from("notes.txt"),
            PathBuf::from("~/My Documents/notes.txt"),
        )
        .unwrap_err();
    assert!(matches!(err, ManifestError::WhitespaceInField { .. }), "got: {err}");
    assert!(m.entries().is_empty(), "rejected entry must not be stored");
    m.save().expect("save");

    let reloaded = load(&home);
    assert!(reloaded.entries().is_empty());
}

// ---------------------------------------------------------------------------
// 4. Format round-trips
// ---------------------------------------------------------------------------

#[rstest]
#[case::plain("notes.txt", "~/notes.txt")]
#[case::dotfile("vimrc", "~/.vimrc")]
#[case::absolute("hosts", "/etc/hosts")]
#[case::nested("config/app.toml", "~/projects/app/config.toml")]
fn entry_survives_save_and_reload(#[case] remote: &str, #[case] local: &str) {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut m = load(&home);
    m.register(RemoteName::from(remote), PathBuf::from(local)).expect("register");
    m.save().expect("save");

    let reloaded = load(&home);
    assert_eq!(reloaded.entries().len(), 1);
    assert_eq!(reloaded.entries()[0].remote_name, RemoteName::from(remote));
    assert_eq!(reloaded.entries()[0].local_path, PathBuf::from(local));
}
