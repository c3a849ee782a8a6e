//! # skylint_diag
//!
//! Diagnostic types for skylint.
//!
//! One [`Diagnostic`] is a single structured issue derived from the game
//! binary's free-text stderr output. The extractor in `skylint_core`
//! produces them; frontends serialize or display them however their own
//! protocol requires.

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
