//! Line-level differencing of artifacts.
//!
//! This module provides:
//! - An edit script between two line sequences, reduced to added and removed lines
//! - Rendering of that script in the `+ line` / `- line` style
//! - Selection of the diff algorithm (Myers, Patience)

/// Rendering of diff entries to output sinks
pub mod render;

pub use render::{write_diff, write_diff_line};

use similar::{Algorithm, ChangeTag, TextDiff};
use std::fmt;
use tracing::{Level, debug, span};

/// Convert `DiffAlgorithm` config enum to `similar::Algorithm`
#[must_use]
pub const fn config_to_algorithm(algo: &crate::config::DiffAlgorithm) -> Algorithm {
    match algo {
        crate::config::DiffAlgorithm::Myers => Algorithm::Myers,
        crate::config::DiffAlgorithm::Patience => Algorithm::Patience,
    }
}

/// Which side of the comparison a diff entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// Present in the new content only.
    Added,
    /// Present in the reference content only.
    Removed,
}

impl DiffTag {
    /// Two-character prefix used when rendering.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Added => "+ ",
            Self::Removed => "- ",
        }
    }
}

/// One entry of the edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Added or removed.
    pub tag: DiffTag,
    /// Line content, without terminator.
    pub text: String,
}

impl DiffLine {
    /// Creates an added entry.
    pub fn added(text: impl Into<String>) -> Self {
        Self {
            tag: DiffTag::Added,
            text: text.into(),
        }
    }

    /// Creates a removed entry.
    pub fn removed(text: impl Into<String>) -> Self {
        Self {
            tag: DiffTag::Removed,
            text: text.into(),
        }
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag.prefix(), self.text)
    }
}

/// Compute the edit script turning `old` into `new`, keeping only the
/// added and removed lines in script order.
///
/// Identical inputs yield an empty result. This is an ordered line diff, not a
/// set difference: a line that merely moved shows up as one removal and one
/// addition.
#[must_use]
pub fn diff_lines(old: &[String], new: &[String], algorithm: Algorithm) -> Vec<DiffLine> {
    let span = span!(
        Level::DEBUG,
        "diff_lines",
        old = old.len(),
        new = new.len(),
        algorithm = ?algorithm
    );
    let _guard = span.enter();

    let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
    let new_refs: Vec<&str> = new.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(algorithm)
        .diff_slices(&old_refs, &new_refs);

    let result: Vec<DiffLine> = diff
        .iter_all_changes()
        .filter_map(|change| match change.tag() {
            ChangeTag::Insert => Some(DiffLine::added(change.value())),
            ChangeTag::Delete => Some(DiffLine::removed(change.value())),
            ChangeTag::Equal => None,
        })
        .collect();

    debug!(changes = result.len(), "Diff computed");
    result
}
