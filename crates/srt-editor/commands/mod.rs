//! Structural editor commands
//!
//! Every command is a pure, all-or-nothing transformation: it consumes a
//! snapshot of the line list plus the records parsed from it, and either
//! returns a complete replacement (or a set of surgical line edits) or
//! fails without touching anything. Batch commands are the exception:
//! they apply sub-steps independently and collect per-step failures as
//! non-fatal warnings.
//!
//! Commands capture absolute line positions from the parsed snapshot
//! before any splice and never interleave splices with further snapshot
//! reads.

pub mod endpoint;
pub mod import;
pub mod merge;
pub mod shift;
pub mod sort;
pub mod split;
pub mod stretch;
pub mod structure;
pub mod timing;

use crate::core::{LineEdit, Result};
use srt_core::Subtitle;

pub use endpoint::{endpoint_at_column, Endpoint, EnforceCommand, ShiftTimeCommand, ShiftTimeStrictCommand};
pub use import::ImportCommand;
pub use merge::MergeCommand;
pub use shift::ShiftCommand;
pub use sort::SortCommand;
pub use split::{SplitCommand, SplitStrategy};
pub use stretch::{parse_anchor_time, StretchCommand, TimeAnchor};
pub use structure::{
    jump_target, AddCommand, DeleteEmptyLinesCommand, FixIndicesCommand, SwapCommand,
};
pub use timing::{FixTimingAllCommand, FixTimingCommand, TimingRules};

/// What a successful command wants done to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Replace the entire buffer with these lines
    Replaced(Vec<String>),
    /// Replace only these specific lines
    Patched(Vec<LineEdit>),
    /// Nothing needed changing (distinct from failure)
    NoOp,
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// What to do with the buffer
    pub outcome: Outcome,
    /// Optional status message for the host to show
    pub message: Option<String>,
    /// Non-fatal per-step failures from batch commands
    pub warnings: Vec<String>,
}

impl CommandResult {
    /// Whole-buffer replacement.
    #[must_use]
    pub fn replaced(lines: Vec<String>) -> Self {
        Self {
            outcome: Outcome::Replaced(lines),
            message: None,
            warnings: Vec::new(),
        }
    }

    /// Surgical line edits.
    #[must_use]
    pub fn patched(edits: Vec<LineEdit>) -> Self {
        Self {
            outcome: Outcome::Patched(edits),
            message: None,
            warnings: Vec::new(),
        }
    }

    /// Nothing to do.
    #[must_use]
    pub fn noop(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::NoOp,
            message: Some(message.into()),
            warnings: Vec::new(),
        }
    }

    /// Attach a status message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach non-fatal warnings.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Whether applying the outcome changes buffer content.
    #[must_use]
    pub const fn changes_buffer(&self) -> bool {
        !matches!(self.outcome, Outcome::NoOp)
    }
}

/// A structural editor over the subtitle document.
///
/// `lines` and `subs` are a consistent snapshot: `subs` was parsed from
/// exactly `lines`. Implementations must not rely on anything else.
pub trait SubtitleCommand: core::fmt::Debug {
    /// Compute the edit. All-or-nothing: an `Err` leaves no partial work.
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult>;

    /// Human-readable description of the command.
    fn description(&self) -> &str;
}

/// Rewrite the index lines of `subs[from..]` to `index + delta` in place.
///
/// Used by merge and split to renumber everything after the edit point
/// while the captured line positions are still valid.
pub(crate) fn renumber_tail(lines: &mut [String], subs: &[Subtitle], from: usize, delta: i64) {
    for sub in &subs[from..] {
        if let Some(slot) = lines.get_mut(sub.line_pos) {
            *slot = sub.index.saturating_add(delta).to_string();
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use srt_core::{parse_subtitles, Subtitle};

    pub fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    pub fn parsed(text: &str) -> (Vec<String>, Vec<Subtitle>) {
        let lines = lines(text);
        let subs = parse_subtitles(&lines).expect("test document must parse");
        (lines, subs)
    }

    /// Two records, 1s..3s and 4s..6s.
    pub const TWO: &str =
        "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:04,000 --> 00:00:06,000\nWorld\n";

    /// Three records at 1s, 4s and 7s.
    pub const THREE: &str = "1\n00:00:01,000 --> 00:00:03,000\nAaa\n\n2\n00:00:04,000 --> 00:00:06,000\nBbb\nCcc\n\n3\n00:00:07,000 --> 00:00:09,000\nDdd\n";
}

#[cfg(test)]
mod tests {
    use super::testutil::parsed;
    use super::*;

    #[test]
    fn renumber_tail_rewrites_index_lines_only() {
        let (mut lines, subs) = parsed(testutil::TWO);
        renumber_tail(&mut lines, &subs, 1, 1);
        assert_eq!(lines[4], "3");
        assert_eq!(lines[0], "1");
        assert_eq!(lines[5], "00:00:04,000 --> 00:00:06,000");
    }

    #[test]
    fn noop_result_does_not_change_buffer() {
        let result = CommandResult::noop("nothing to fix");
        assert!(!result.changes_buffer());
        assert_eq!(result.message.as_deref(), Some("nothing to fix"));
    }
}
