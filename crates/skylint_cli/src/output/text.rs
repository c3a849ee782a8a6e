//! Text output formatter

use skylint_core::{Diagnostic, Severity};

pub fn output_text(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let severity = match diagnostic.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        match (&diagnostic.file, diagnostic.line()) {
            (Some(file), Some(line)) => {
                println!("{}:{} {}: {}", file.display(), line, severity, diagnostic.message);
            }
            (Some(file), None) => {
                println!("{} {}: {}", file.display(), severity, diagnostic.message);
            }
            _ => {
                let entity = diagnostic.entity.as_deref().unwrap_or("<unknown>");
                println!("{} {}: {}", entity, severity, diagnostic.message);
            }
        }
    }

    println!();
    println!("Found {} issues", diagnostics.len());
}
