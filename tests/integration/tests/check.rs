//! Integration tests for `skylint check`
//!
//! The game binary is stood in for by shell scripts that emit canned
//! stderr, so these tests cover the full staging → run → extraction → output
//! pipeline without a real Endless Sky install.
#![cfg(unix)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn skylint_cmd() -> Command {
    Command::cargo_bin("skylint").expect("skylint binary builds")
}

/// Writes an executable shell script standing in for the game binary. For a
/// validation run its arguments are `-s --config <dir> --resources <dir>`.
fn fake_validator(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-endless-sky.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn plugin_fixture() -> TempDir {
    let plugin = tempfile::tempdir().unwrap();
    std::fs::create_dir(plugin.path().join("data")).unwrap();
    std::fs::write(
        plugin.path().join("data").join("ships.txt"),
        "Ship Canoe\n\tdescription \"small\"",
    )
    .unwrap();
    plugin
}

const NODE_ERROR_BODY: &str = "printf '\\nSkipping unrecognized root object:\\nfile \"%s/plugins/zzzTemp/data/ships.txt\"\\nL1:   Ship Canoe\\n\\n' \"$3\" 1>&2\n";

mod issues_found {
    use super::*;

    #[test]
    fn reports_staged_paths_in_caller_terms() {
        let plugin = plugin_fixture();
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_validator(dir.path(), NODE_ERROR_BODY);

        skylint_cmd()
            .arg("check")
            .arg(plugin.path())
            .arg("--executable")
            .arg(&exe)
            .assert()
            .code(1)
            .stdout(predicate::str::contains(format!(
                "{}:1 warning: Skipping unrecognized root object:",
                plugin.path().join("data").join("ships.txt").display()
            )));
    }

    #[test]
    fn json_format_serializes_diagnostics() {
        let plugin = plugin_fixture();
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_validator(dir.path(), NODE_ERROR_BODY);

        let output = skylint_cmd()
            .arg("check")
            .arg(plugin.path())
            .arg("--executable")
            .arg(&exe)
            .arg("--format")
            .arg("json")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed[0]["kind"], "node-error");
        assert_eq!(parsed[0]["lines"][0], 1);
    }
}

mod clean_runs {
    use super::*;

    #[test]
    fn quiet_validator_exits_zero() {
        let plugin = plugin_fixture();
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_validator(dir.path(), "exit 0\n");

        skylint_cmd()
            .arg("check")
            .arg(plugin.path())
            .arg("--executable")
            .arg(&exe)
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 0 issues"));
    }

    #[test]
    fn staged_config_is_gone_after_the_run() {
        let plugin = plugin_fixture();
        let dir = tempfile::tempdir().unwrap();
        let recorded = dir.path().join("config-root.txt");
        let exe = fake_validator(
            dir.path(),
            &format!("printf '%s' \"$3\" > {}\n", recorded.display()),
        );

        skylint_cmd()
            .arg("check")
            .arg(plugin.path())
            .arg("--executable")
            .arg(&exe)
            .assert()
            .success();

        let config_root = std::fs::read_to_string(&recorded).unwrap();
        assert!(!config_root.is_empty());
        assert!(!Path::new(config_root.trim()).exists());
    }
}

mod failures {
    use super::*;

    #[test]
    fn missing_executable_flag_is_a_usage_error() {
        let plugin = plugin_fixture();

        skylint_cmd()
            .arg("check")
            .arg(plugin.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no validator configured"));
    }

    #[test]
    fn nonexistent_executable_is_an_execution_error() {
        let plugin = plugin_fixture();

        skylint_cmd()
            .arg("check")
            .arg(plugin.path())
            .arg("--executable")
            .arg("/nonexistent/endless-sky")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("validator executable not found"));
    }
}
