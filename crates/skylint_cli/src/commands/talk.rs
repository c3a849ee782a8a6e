//! `skylint talk` - preview a conversation through the game's dialog mode.

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use skylint_core::{InteractiveOutcome, Linter};

pub async fn run(executable: &Path, input: Option<&Path>, resources: &Path) -> Result<()> {
    let text = match input {
        Some(file) => std::fs::read_to_string(file).into_diagnostic()?,
        None => std::io::read_to_string(std::io::stdin()).into_diagnostic()?,
    };

    let linter = Linter::new(executable);
    match linter
        .preview_conversation(&text, resources)
        .await
        .into_diagnostic()?
    {
        InteractiveOutcome::Completed(status) => {
            info!(status = %status, "conversation preview finished");
        }
        InteractiveOutcome::Preempted => {
            info!("conversation preview preempted by a newer request");
        }
    }
    Ok(())
}
