//! Orchestration: stage, run the validator, extract diagnostics.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use skylint_diag::Diagnostic;

use crate::error::LintError;
use crate::extract::{extract, extract_with_resolver};
use crate::resolve::{PathKind, ResourceMarkers, classify};
use crate::run::{InteractiveOutcome, InteractiveSession, run_validation};
use crate::stage::{StageOptions, StagedFilesystem};

/// Lints game data by invoking the game binary itself against a staged
/// runtime filesystem.
///
/// Each lint call stages its own sandbox, so concurrent calls on one
/// `Linter` are independent. The linter also owns the single
/// [`InteractiveSession`] used for conversation previews, giving those
/// last-writer-wins semantics.
pub struct Linter {
    executable: PathBuf,
    markers: ResourceMarkers,
    session: InteractiveSession,
}

impl Linter {
    /// Creates a linter around the given validator executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            markers: ResourceMarkers::default(),
            session: InteractiveSession::new(),
        }
    }

    /// Replaces the core-resources marker heuristic.
    #[must_use]
    pub fn with_markers(mut self, markers: ResourceMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// The validator executable this linter invokes.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Lints a plugin directory against a synthesized resources skeleton.
    ///
    /// Paths the validator reports under the staged symlink are mapped back
    /// to the caller's real plugin directory.
    pub async fn lint_plugin(&self, plugin_dir: &Path) -> Result<Vec<Diagnostic>, LintError> {
        let plugin_dir = std::path::absolute(plugin_dir)?;
        info!(plugin = %plugin_dir.display(), "linting plugin");

        let staged = StagedFilesystem::stage(&StageOptions::for_plugin(&plugin_dir))?;
        let stderr =
            run_validation(&self.executable, staged.config_root(), staged.resources_root())
                .await?;

        let diagnostics = match staged.staged_plugin() {
            Some(link) => {
                let link = link.to_path_buf();
                let resolve = move |reported: &Path| -> PathBuf {
                    // Anything outside the staged link (e.g. a path in the
                    // synthesized resources) is left as reported.
                    match reported.strip_prefix(&link) {
                        Ok(relative) => plugin_dir.join(relative),
                        Err(_) => reported.to_path_buf(),
                    }
                };
                extract_with_resolver(&stderr, Some(&resolve))
            }
            None => extract(&stderr),
        };
        debug!(count = diagnostics.len(), "plugin lint finished");
        Ok(diagnostics)
    }

    /// Lints an existing core resources tree in place.
    pub async fn lint_core_data(&self, resources: &Path) -> Result<Vec<Diagnostic>, LintError> {
        info!(resources = %resources.display(), "linting core data");
        let staged = StagedFilesystem::stage(&StageOptions::for_resources(resources))?;
        let stderr =
            run_validation(&self.executable, staged.config_root(), staged.resources_root())
                .await?;
        let diagnostics = extract(&stderr);
        debug!(count = diagnostics.len(), "core data lint finished");
        Ok(diagnostics)
    }

    /// Classifies `path` and lints whichever tree it belongs to.
    ///
    /// A loose file belongs to neither tree and yields no diagnostics.
    pub async fn lint_path(&self, path: &Path) -> Result<Vec<Diagnostic>, LintError> {
        match classify(path, &self.markers) {
            PathKind::CoreResources { resources_root } => {
                self.lint_core_data(&resources_root).await
            }
            PathKind::Plugin { plugin_root } => self.lint_plugin(&plugin_root).await,
            PathKind::Loose => {
                debug!(path = %path.display(), "not under a data tree, skipping");
                Ok(Vec::new())
            }
        }
    }

    /// Runs the validator's dialog mode over `text`, staged against the
    /// given resources tree. A newer preview on the same linter preempts a
    /// still-running one.
    pub async fn preview_conversation(
        &self,
        text: &str,
        resources: &Path,
    ) -> Result<InteractiveOutcome, LintError> {
        let staged = StagedFilesystem::stage(&StageOptions::for_resources(resources))?;
        self.session
            .run(
                &self.executable,
                staged.config_root(),
                staged.resources_root(),
                text,
            )
            .await
    }

    /// The diagnostics from `diagnostics` that address `file`.
    ///
    /// Frontends that report per-document (the original use case) filter
    /// the full run down to the document being shown.
    pub fn diagnostics_for_file<'a>(
        diagnostics: &'a [Diagnostic],
        file: &'a Path,
    ) -> impl Iterator<Item = &'a Diagnostic> {
        diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.file.as_deref() == Some(file))
    }
}
