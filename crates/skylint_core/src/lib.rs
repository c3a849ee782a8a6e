//! # skylint_core
//!
//! Core engine for skylint: lints Endless Sky data files by running the
//! game binary itself against a staged, disposable runtime filesystem and
//! extracting structured diagnostics from its stderr.
//!
//! This crate provides:
//! - The [`Linter`] orchestrator (stage, run, extract)
//! - Disposable filesystem staging with guaranteed teardown
//! - The validator process runner, including the preemptible
//!   interactive/dialog mode
//! - The stderr diagnostic extractor (three recognizer shapes)
//! - Best-effort path classification (core data vs plugin)
//!
//! ## Example
//!
//! ```rust,ignore
//! use skylint_core::Linter;
//!
//! let linter = Linter::new("/path/to/endless-sky");
//! let diagnostics = linter.lint_plugin("my-plugin".as_ref()).await?;
//! for diagnostic in &diagnostics {
//!     println!("{:?}: {}", diagnostic.file, diagnostic.message);
//! }
//! ```

mod error;
pub mod extract;
mod linter;
pub mod resolve;
pub mod run;
pub mod stage;

pub use error::LintError;
pub use extract::{extract, extract_with_resolver};
pub use linter::Linter;
pub use resolve::{PathKind, ResourceMarkers, classify};
pub use run::{InteractiveOutcome, InteractiveSession, run_validation};
pub use stage::{StageOptions, StagedFilesystem, TEMP_PLUGIN_NAME};

#[cfg(test)]
pub mod test_utils;

pub use skylint_diag::{Diagnostic, DiagnosticKind, Severity};
