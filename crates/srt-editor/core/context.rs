//! Collaborator interfaces toward the host editor surface
//!
//! The core never talks to a UI directly. The host supplies a snapshot
//! of the buffer and the caret, receives replacement lines, and answers
//! the occasional prompt. Each command invocation gets its own private
//! copy of the line list; the host serializes the final buffer
//! replacement, so nothing here needs locking.

use crate::commands::split::SplitStrategy;
use crate::commands::stretch::TimeAnchor;
use srt_core::TimeMs;

/// Caret and selection state at the moment a command was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Zero-based line of the primary cursor
    pub line: usize,
    /// Zero-based column of the primary cursor
    pub column: usize,
    /// Zero-based line of the selection end (equals `line` when nothing
    /// is selected)
    pub end_line: usize,
}

impl Caret {
    /// Caret at a line with no selection.
    #[must_use]
    pub const fn at(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            end_line: line,
        }
    }

    /// Whether a multi-line selection is active.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.line != self.end_line
    }
}

/// A surgical single-line replacement, for minimal-diff application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    /// Zero-based line to replace
    pub line: usize,
    /// New text for that line
    pub text: String,
}

impl LineEdit {
    /// Replace `line` with `text`.
    #[must_use]
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// What the editor surface provides to, and accepts from, the core.
///
/// `lines` must already be newline-normalized (CRLF folded to LF and the
/// text split on LF). The two replace operations are the only ways the
/// core changes the buffer.
pub trait EditorSurface {
    /// Snapshot of the full buffer as a line list.
    fn lines(&self) -> Vec<String>;

    /// Caret and selection at invocation time.
    fn caret(&self) -> Caret;

    /// Replace the entire buffer contents.
    fn replace_all(&mut self, lines: Vec<String>);

    /// Replace specific lines in place, leaving the rest untouched.
    fn replace_lines(&mut self, edits: Vec<LineEdit>);

    /// Move the caret to the start of a line (used by jump).
    fn reveal_line(&mut self, line: usize);
}

/// Runtime decisions the core must suspend for.
///
/// Control stops at a single well-defined point per question; `None`
/// means the user abandoned the prompt and the whole command
/// short-circuits with no side effects. Tests supply fixed answers.
pub trait PromptSource {
    /// Ask for a time value, offering a default. Hosts validate input
    /// with [`srt_core::time::parse_flexible`].
    fn input_time(&mut self, prompt: &str, default: Option<TimeMs>) -> Option<TimeMs>;

    /// Ask for a time value with an optional trailing `S`/`E` anchor
    /// suffix, as accepted by the stretch command.
    fn input_anchor(&mut self, prompt: &str) -> Option<(TimeMs, TimeAnchor)>;

    /// Ask how to split a subtitle when the configuration says "ask".
    fn choose_split_strategy(&mut self) -> Option<SplitStrategy>;

    /// Ask for a subtitle sequence number (used by jump).
    fn input_index(&mut self, prompt: &str) -> Option<i64>;
}
