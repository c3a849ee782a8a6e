//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use skylint_core::Diagnostic;

pub fn output_json(diagnostics: &[Diagnostic]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(diagnostics).into_diagnostic()?
    );
    Ok(())
}
