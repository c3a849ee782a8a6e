//! Integration tests for `skylint talk`
#![cfg(unix)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;

fn skylint_cmd() -> Command {
    Command::cargo_bin("skylint").expect("skylint binary builds")
}

/// For a dialog run the script's arguments are
/// `--config <dir> --resources <dir> --talk`.
fn fake_validator(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-endless-sky.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn delivers_conversation_text_over_stdin() {
    let resources = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    // The staged resources root is the real one we pass in, so the script
    // can drop its evidence there.
    let exe = fake_validator(dir.path(), "cat > \"$4/dialog.txt\"\n");

    skylint_cmd()
        .arg("talk")
        .arg("--resources")
        .arg(resources.path())
        .arg("--executable")
        .arg(&exe)
        .write_stdin("conversation \"test\"\n\tscene begins")
        .assert()
        .success();

    let delivered = std::fs::read_to_string(resources.path().join("dialog.txt")).unwrap();
    assert_eq!(delivered, "conversation \"test\"\n\tscene begins");
}

#[test]
fn reads_conversation_from_a_file() {
    let resources = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("conversation.txt");
    std::fs::write(&input, "conversation \"from file\"").unwrap();
    let exe = fake_validator(dir.path(), "cat > \"$4/dialog.txt\"\n");

    skylint_cmd()
        .arg("talk")
        .arg(&input)
        .arg("--resources")
        .arg(resources.path())
        .arg("--executable")
        .arg(&exe)
        .assert()
        .success();

    let delivered = std::fs::read_to_string(resources.path().join("dialog.txt")).unwrap();
    assert_eq!(delivered, "conversation \"from file\"");
}
