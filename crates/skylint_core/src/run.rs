//! Validator process execution.
//!
//! Two entry points: [`run_validation`] runs the game non-interactively in
//! silent/validate mode and captures its stderr to completion, and
//! [`InteractiveSession::run`] spawns the dialog/conversation mode, feeding
//! it input over stdin. The session holds at most one live interactive
//! child; starting a new run preempts a still-running prior one
//! (last-writer-wins).

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Mutex;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::LintError;

fn ensure_executable(executable: &Path) -> Result<(), LintError> {
    if !executable.exists() {
        return Err(LintError::execution(format!(
            "validator executable not found: {}",
            executable.display()
        )));
    }
    Ok(())
}

/// Runs the validator non-interactively and returns its captured stderr.
///
/// Invoked with `-s --config <config> --resources <resources>`; stdout is
/// discarded. A non-zero exit code is not a failure: the game reports
/// validation problems on stderr without necessarily failing the process,
/// so the stream is returned regardless of exit status. Only a missing
/// executable or a spawn failure is an error.
pub async fn run_validation(
    executable: &Path,
    config_root: &Path,
    resources_root: &Path,
) -> Result<String, LintError> {
    ensure_executable(executable)?;

    let output = Command::new(executable)
        .arg("-s")
        .arg("--config")
        .arg(config_root)
        .arg("--resources")
        .arg(resources_root)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            LintError::spawn(
                format!("failed to run validator: {}", executable.display()),
                e,
            )
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() && stderr.is_empty() {
        // Exit code is irrelevant to extraction, but a silent non-zero exit
        // usually means the tool crashed rather than validated.
        warn!(status = %output.status, "validator exited non-zero with empty stderr");
    }
    debug!(status = %output.status, bytes = stderr.len(), "validation run finished");
    Ok(stderr)
}

/// How an interactive invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveOutcome {
    /// The child ran to completion with this status.
    Completed(ExitStatus),
    /// A newer invocation on the same session displaced this one; its child
    /// was killed. A normal outcome, not an error.
    Preempted,
}

/// Handle tracking at most one outstanding interactive validator process.
///
/// Owned by whichever component issues interactive requests; starting a new
/// run while a previous one is still alive terminates the previous child
/// first. This models "cancel the stale preview, start the new one" for a
/// human issuing rapid successive requests.
#[derive(Debug, Default)]
pub struct InteractiveSession {
    current: Mutex<Option<RunHandle>>,
}

/// Control endpoints a live invocation leaves in the session slot so the
/// next invocation can displace it.
#[derive(Debug)]
struct RunHandle {
    /// Tells the invocation to kill its child and return `Preempted`.
    preempt: oneshot::Sender<()>,
    /// Resolves once the invocation's child has been reaped (or the
    /// invocation's future was dropped, which kills the child too).
    finished: oneshot::Receiver<()>,
}

impl InteractiveSession {
    /// Creates a session with no outstanding process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the validator in dialog mode, writes `input` to its stdin,
    /// closes the stream, and waits for the child to exit.
    ///
    /// The child's own stdout/stderr are not surfaced; only spawn failure
    /// is an error. Preemption by a later run yields
    /// [`InteractiveOutcome::Preempted`].
    pub async fn run(
        &self,
        executable: &Path,
        config_root: &Path,
        resources_root: &Path,
        input: &str,
    ) -> Result<InteractiveOutcome, LintError> {
        ensure_executable(executable)?;

        // Claim the session slot before spawning, displacing any prior
        // invocation, then wait for its child to be reaped. The new child
        // is only spawned once the old one is gone, so at most one
        // interactive child is ever alive.
        let (preempt_tx, mut preempt_rx) = oneshot::channel::<()>();
        let (finished_tx, finished_rx) = oneshot::channel::<()>();
        let previous = {
            let mut slot = self
                .current
                .lock()
                .map_err(|_| LintError::execution("interactive session lock poisoned"))?;
            slot.replace(RunHandle {
                preempt: preempt_tx,
                finished: finished_rx,
            })
        };
        if let Some(previous) = previous {
            // Best-effort: the previous run may already have finished, in
            // which case both channels resolve immediately.
            let _ = previous.preempt.send(());
            let _ = previous.finished.await;
        }

        let mut child = Command::new(executable)
            .arg("--config")
            .arg(config_root)
            .arg("--resources")
            .arg(resources_root)
            .arg("--talk")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                LintError::spawn(
                    format!("failed to spawn validator: {}", executable.display()),
                    e,
                )
            })?;

        // A child that never reads stdin leaves the writer blocked once the
        // pipe fills, so the write itself must also race the preemption
        // signal.
        let mut preempted = false;
        if let Some(mut stdin) = child.stdin.take() {
            tokio::select! {
                written = stdin.write_all(input.as_bytes()) => {
                    // The child may exit before reading everything; that is
                    // not this invocation's failure.
                    if let Err(e) = written {
                        warn!("failed to deliver dialog input: {e}");
                    }
                }
                _ = &mut preempt_rx => {
                    preempted = true;
                }
            }
            // Dropping the handle closes the stream, signalling end of
            // input.
        }

        let finished = if preempted {
            None
        } else {
            tokio::select! {
                status = child.wait() => Some(status?),
                _ = &mut preempt_rx => None,
            }
        };
        let outcome = match finished {
            Some(status) => {
                debug!(status = %status, "interactive run finished");
                InteractiveOutcome::Completed(status)
            }
            None => {
                if let Err(e) = child.start_kill() {
                    warn!("failed to kill preempted validator: {e}");
                }
                // Reap before signalling so no zombie outlives the handoff.
                let _ = child.wait().await;
                debug!("interactive run preempted by a newer request");
                InteractiveOutcome::Preempted
            }
        };
        // Release whoever displaced us; also resolved by drop on the error
        // path above.
        let _ = finished_tx.send(());
        Ok(outcome)
    }
}
