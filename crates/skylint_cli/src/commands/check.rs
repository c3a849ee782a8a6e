//! `skylint check` - lint a path and print diagnostics.

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use skylint_core::{Linter, ResourceMarkers};

use crate::output;

pub async fn run(
    executable: &Path,
    path: &Path,
    format: &str,
    only_this_file: bool,
) -> Result<bool> {
    let linter = Linter::new(executable);

    // A directory with a data/ subtree is lintable directly; anything else
    // goes through file classification.
    let diagnostics = if path.is_dir() && path.join("data").is_dir() {
        if ResourceMarkers::default().matches(path) {
            info!(path = %path.display(), "linting as core resources tree");
            linter.lint_core_data(path).await
        } else {
            info!(path = %path.display(), "linting as plugin");
            linter.lint_plugin(path).await
        }
    } else {
        linter.lint_path(path).await
    }
    .into_diagnostic()?;

    let shown = if only_this_file {
        let absolute = std::path::absolute(path).into_diagnostic()?;
        Linter::diagnostics_for_file(&diagnostics, &absolute)
            .cloned()
            .collect()
    } else {
        diagnostics
    };

    output::output_results(&shown, format)?;
    Ok(!shown.is_empty())
}
