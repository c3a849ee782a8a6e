//! Output formatting module

mod json;
mod text;

use miette::Result;
use skylint_core::Diagnostic;

pub fn output_results(diagnostics: &[Diagnostic], format: &str) -> Result<()> {
    match format {
        "json" => json::output_json(diagnostics)?,
        _ => text::output_text(diagnostics),
    }
    Ok(())
}
