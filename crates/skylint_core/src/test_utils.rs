//! Shared helpers for in-crate tests.

/// Writes an executable shell script standing in for the game binary.
///
/// The script body sees the validator's own argument conventions: for a
/// validation run `$1..$5` are `-s --config <dir> --resources <dir>`, for a
/// dialog run `$1..$5` are `--config <dir> --resources <dir> --talk`.
#[cfg(unix)]
pub fn fake_validator(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let name = format!("fake-validator-{}.sh", COUNTER.fetch_add(1, Ordering::Relaxed));
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
