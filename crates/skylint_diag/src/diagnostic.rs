//! Diagnostic types for validator output.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
///
/// The game reports data problems it can recover from, so every shape the
/// extractor recognizes today maps to [`Severity::Warning`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - the data file cannot be loaded.
    Error,
    /// Warning - the game loads the file but skips or patches the construct.
    #[default]
    Warning,
    /// Info - informational message.
    Info,
}

/// Which recognizer shape produced a diagnostic.
///
/// Used for diagnosis and testing only; severity never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A bad data-file construct, reported with file and line markers.
    NodeError,
    /// A loaded entity with descriptive complaints and an outfit list.
    EntityError,
    /// An outfit equipped on a ship but missing from its outfit list.
    EquippedOutfit,
}

/// A single structured issue derived from the validator's stderr stream.
///
/// Immutable once produced. `file` and `lines` are present only for
/// [`DiagnosticKind::NodeError`]; the other shapes identify a named in-game
/// entity rather than a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Absolute path in the caller's addressing space, when the shape
    /// carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// All 1-based `L<n>:` markers captured from the block, outermost
    /// first. Empty for shapes without a source location.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<u32>,

    /// In-game entity name, for shapes that identify one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Short human-readable summary (first line of the matched block).
    pub message: String,

    /// The complete matched text block, kept for related-information
    /// display.
    pub full_message: String,

    /// The recognizer shape that produced this diagnostic.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a node-error diagnostic addressing `file`.
    pub fn node_error(
        file: impl Into<PathBuf>,
        lines: Vec<u32>,
        message: impl Into<String>,
        full_message: impl Into<String>,
    ) -> Self {
        Self {
            file: Some(file.into()),
            lines,
            entity: None,
            message: message.into(),
            full_message: full_message.into(),
            kind: DiagnosticKind::NodeError,
        }
    }

    /// Creates an entity-error diagnostic for the named entity.
    pub fn entity_error(
        entity: impl Into<String>,
        message: impl Into<String>,
        full_message: impl Into<String>,
    ) -> Self {
        Self {
            file: None,
            lines: Vec::new(),
            entity: Some(entity.into()),
            message: message.into(),
            full_message: full_message.into(),
            kind: DiagnosticKind::EntityError,
        }
    }

    /// Creates an equipped-but-unlisted-outfit diagnostic.
    pub fn equipped_outfit(
        entity: impl Into<String>,
        message: impl Into<String>,
        full_message: impl Into<String>,
    ) -> Self {
        Self {
            file: None,
            lines: Vec::new(),
            entity: Some(entity.into()),
            message: message.into(),
            full_message: full_message.into(),
            kind: DiagnosticKind::EquippedOutfit,
        }
    }

    /// The representative 1-based line number: the last marker in the
    /// block. Multi-line traces report an outer-to-inner path, so the last
    /// marker is the most specific location to highlight.
    pub fn line(&self) -> Option<u32> {
        self.lines.last().copied()
    }

    /// Severity of this diagnostic. Every shape the game emits today is
    /// recoverable, so this is always [`Severity::Warning`].
    pub fn severity(&self) -> Severity {
        Severity::Warning
    }
}
