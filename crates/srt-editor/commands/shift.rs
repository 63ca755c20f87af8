//! Shift subtitle timings by a fixed offset

use super::sort::sorted_lines;
use super::{CommandResult, SubtitleCommand};
use crate::core::{EditorError, Result};
use srt_core::time::{duration_line, format_signed_seconds, TimeMs};
use srt_core::{parse_subtitles, Subtitle};

/// Shift records `first..=last` by `delta` milliseconds.
///
/// The whole range is validated before a single line is written: if any
/// record would land before zero the command fails and the document is
/// untouched. A ranged shift can reorder records relative to their
/// unshifted neighbours, so `resort` rebuilds the document in start
/// order afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftCommand {
    /// First record of the range
    pub first: usize,
    /// Last record of the range, inclusive
    pub last: usize,
    /// Offset in milliseconds, negative to shift backwards
    pub delta: TimeMs,
    /// Re-sort the document after shifting
    pub resort: bool,
}

impl ShiftCommand {
    /// Shift every record in the document. Order is preserved, so no
    /// re-sort is needed.
    #[must_use]
    pub const fn whole_document(count: usize, delta: TimeMs) -> Self {
        Self {
            first: 0,
            last: count.saturating_sub(1),
            delta,
            resort: false,
        }
    }
}

impl SubtitleCommand for ShiftCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        if self.first > self.last || self.last >= subs.len() {
            return Err(EditorError::NotInSubtitle);
        }
        let range = &subs[self.first..=self.last];

        for sub in range {
            let floor = (sub.start_ms + self.delta).min(sub.end_ms + self.delta);
            if floor < 0 {
                return Err(EditorError::command_failed(format!(
                    "can't shift subtitle {} before 0. Over by {}",
                    sub.index,
                    format_signed_seconds(floor)
                )));
            }
        }

        let mut new = lines.to_vec();
        for sub in range {
            if let Some(slot) = new.get_mut(sub.timing_line()) {
                *slot = duration_line(sub.start_ms + self.delta, sub.end_ms + self.delta);
            }
        }
        let new = if self.resort {
            let shifted = parse_subtitles(&new)?;
            sorted_lines(&new, &shifted)
        } else {
            new
        };
        let count = self.last - self.first + 1;
        Ok(CommandResult::replaced(new)
            .with_message(format!("Shifted {count} subtitles by {} ms", self.delta)))
    }

    fn description(&self) -> &str {
        "Shift subtitles"
    }
}
