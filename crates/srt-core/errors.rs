//! Parse error types for SubRip documents
//!
//! A parse error aborts document parsing entirely and pinpoints the
//! offending line. Recoverable problems (non-sequential indices, overlap,
//! short pauses) are reported by the annotation scanner instead, which
//! never aborts.

use core::fmt;
use thiserror::Error;

/// The syntactic category a parse failed in.
///
/// Callers dispatch on this: the empty-line healer only repairs
/// [`ParseErrorKind::BadIndexLine`] failures and surfaces everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// Expected a pure-digit subtitle index line
    BadIndexLine,
    /// Expected a strict `HH:MM:SS,mmm --> HH:MM:SS,mmm` duration line
    BadTimingLine,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadIndexLine => write!(f, "bad index line"),
            Self::BadTimingLine => write!(f, "bad timing line"),
        }
    }
}

/// Structured parse failure with a zero-based line number.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at line {line}")]
pub struct ParseError {
    /// What category of line failed to parse
    pub kind: ParseErrorKind,
    /// Zero-based line number where the failure was detected
    pub line: usize,
}

impl ParseError {
    /// Create a parse error of the given kind at a line.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// Whether the empty-line healer can attempt to repair this error.
    #[must_use]
    pub const fn is_healable(&self) -> bool {
        matches!(self.kind, ParseErrorKind::BadIndexLine)
    }
}
