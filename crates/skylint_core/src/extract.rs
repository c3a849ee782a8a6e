//! Diagnostic extraction from the validator's stderr stream.
//!
//! The game's error log is unstructured text carrying three unrelated
//! message shapes. Rather than one monolithic grammar, three independent
//! recognizers each scan the whole normalized stream for non-overlapping
//! matches of their own shape; results are merged back into stream order.
//!
//! The shapes, as the game emits them:
//!
//! 1. **Node error**: `DataNode::PrintTrace()` output, a blank line, a
//!    message line, a `file <path>` line (path optionally quote-wrapped),
//!    then one or more `L<n>:` trace lines, outermost location first.
//! 2. **Entity error**: `Files::LogError()` output for a loaded ship, a
//!    `(<name>)` line (one optional nested parenthesized variant), a
//!    message line, a `has outfits:` marker, tab-indented outfit lines, and
//!    a trailing blank line.
//! 3. **Equipped-outfit error**: a single line,
//!    `<entity>: outfit "<name>" ... .` with no blank-line framing at all.
//!
//! Extraction is pure and idempotent: same stream in, same diagnostics out,
//! and the input text is never mutated.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use skylint_diag::Diagnostic;

/// Reverse-maps a path the validator reported (under the staged symlink
/// tree) back to the caller's addressing space.
pub type PathResolver<'a> = &'a dyn Fn(&Path) -> PathBuf;

/// `(<entity>)` or `(<entity> (<variant>))`, followed by a colon.
static ENTITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<entity>\([^()]+(?:\([^()]*\))?\)):$").expect("entity pattern is valid")
});

/// `<entity>: outfit "<name>" <rest of sentence ending in a period>`.
static EQUIPPED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<entity>.*?): (?P<msg>outfit "(?P<outfit>.*?)".*\.)$"#)
        .expect("equipped-outfit pattern is valid")
});

/// Extracts all diagnostics from the raw stderr stream.
pub fn extract(output: &str) -> Vec<Diagnostic> {
    extract_with_resolver(output, None)
}

/// Extracts all diagnostics, rewriting captured file paths through
/// `resolver` after separator normalization.
///
/// Diagnostics are returned in the order their source blocks appear in the
/// stream. A stream yielding zero matches of every shape is a normal
/// outcome, not an error.
pub fn extract_with_resolver(output: &str, resolver: Option<PathResolver<'_>>) -> Vec<Diagnostic> {
    // Normalize line endings, and prepend one blank line so a block at
    // offset zero still has its leading blank-line delimiter.
    let normalized = format!("\n{}", output.replace("\r\n", "\n"));
    let lines: Vec<&str> = normalized.split('\n').collect();

    // Each recognizer reports (start line, diagnostic); merging by start
    // restores stream order across shapes.
    let mut found: Vec<(usize, Diagnostic)> = Vec::new();
    found.extend(node_errors(&lines, resolver));
    found.extend(entity_errors(&lines));
    found.extend(equipped_outfit_errors(&lines));
    found.sort_by_key(|(start, _)| *start);

    found.into_iter().map(|(_, diag)| diag).collect()
}

/// A line `i` of the split text is preceded by a newline for `i >= 1` and
/// followed by one iff it is not the final element.
fn has_trailing_newline(lines: &[&str], i: usize) -> bool {
    i + 1 < lines.len()
}

/// Recognizer for shape 1: blank line, message, `file` line, `L<n>:` lines.
fn node_errors(lines: &[&str], resolver: Option<PathResolver<'_>>) -> Vec<(usize, Diagnostic)> {
    let mut found = Vec::new();
    let mut i = 2;
    while i + 2 < lines.len() {
        // The message line must sit right after a blank line (two
        // consecutive newlines, which the prepended blank line provides for
        // a block at the top of the stream).
        if !lines[i - 1].is_empty() {
            i += 1;
            continue;
        }
        let Some(file_raw) = parse_file_line(lines[i + 1]) else {
            i += 1;
            continue;
        };

        let mut markers = Vec::new();
        let mut j = i + 2;
        while has_trailing_newline(lines, j) {
            match parse_line_marker(lines[j]) {
                Some(n) => {
                    markers.push(n);
                    j += 1;
                }
                None => break,
            }
        }
        if markers.is_empty() {
            i += 1;
            continue;
        }

        let full_message = lines[i..j].join("\n");
        found.push((
            i,
            Diagnostic::node_error(
                resolve_file(file_raw, resolver),
                markers,
                lines[i],
                full_message,
            ),
        ));
        i = j;
    }
    found
}

/// Recognizer for shape 2: entity line, message, `has outfits:`, tab-indented
/// list, trailing blank line.
fn entity_errors(lines: &[&str]) -> Vec<(usize, Diagnostic)> {
    let mut found = Vec::new();
    let mut i = 1;
    while i + 2 < lines.len() {
        let Some(captures) = ENTITY_LINE.captures(lines[i]) else {
            i += 1;
            continue;
        };
        if lines[i + 2] != "has outfits:" {
            i += 1;
            continue;
        }

        let mut j = i + 3;
        while j < lines.len() && lines[j].starts_with('\t') {
            j += 1;
        }
        // The list must be closed by a blank line that is itself followed
        // by a newline.
        if !(j + 1 < lines.len() && lines[j].is_empty()) {
            i += 1;
            continue;
        }

        let full_message = lines[i..j].join("\n");
        found.push((
            i,
            Diagnostic::entity_error(&captures["entity"], lines[i + 1], full_message),
        ));
        i = j;
    }
    found
}

/// Recognizer for shape 3: a single `<entity>: outfit "..." ... .` line.
fn equipped_outfit_errors(lines: &[&str]) -> Vec<(usize, Diagnostic)> {
    let mut found = Vec::new();
    for i in 1..lines.len() {
        if !has_trailing_newline(lines, i) {
            continue;
        }
        if let Some(captures) = EQUIPPED_LINE.captures(lines[i]) {
            found.push((
                i,
                Diagnostic::equipped_outfit(&captures["entity"], &captures["msg"], lines[i]),
            ));
        }
    }
    found
}

/// Parses a `file <path>` line, stripping a matching pair of wrapping
/// quotes.
fn parse_file_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("file ")?;
    if rest.len() >= 2 && rest.starts_with('"') && rest.ends_with('"') {
        Some(&rest[1..rest.len() - 1])
    } else {
        Some(rest)
    }
}

/// Parses an `L<n>:` trace marker, returning the 1-based line number.
fn parse_line_marker(line: &str) -> Option<u32> {
    let rest = line.strip_prefix('L')?;
    let digits_end = rest.find(':')?;
    rest[..digits_end].parse().ok()
}

/// Normalizes separators in a reported path, then applies the resolver.
///
/// The game always emits forward-slash paths, so on Windows they are
/// converted back to the native separator first.
fn resolve_file(raw: &str, resolver: Option<PathResolver<'_>>) -> PathBuf {
    let native = if std::path::MAIN_SEPARATOR == '\\' {
        raw.replace('/', "\\")
    } else {
        raw.to_string()
    };
    let path = PathBuf::from(native);
    match resolver {
        Some(resolve) => resolve(&path),
        None => path,
    }
}
