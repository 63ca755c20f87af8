//! Reorder subtitle records by start time

use super::{CommandResult, SubtitleCommand};
use crate::core::Result;
use srt_core::Subtitle;

/// Rebuild the document with records ordered by start time.
///
/// The sort is stable, so records with equal start times keep their
/// textual order. Timing and text lines are copied byte for byte; only
/// the index lines are rewritten to the new sequential order, and every
/// record gains exactly one separator blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortCommand;

impl SubtitleCommand for SortCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        Ok(CommandResult::replaced(sorted_lines(lines, subs)))
    }

    fn description(&self) -> &str {
        "Sort subtitles"
    }
}

/// Emit a fresh line list with `subs` ordered by start time.
pub(crate) fn sorted_lines(lines: &[String], subs: &[Subtitle]) -> Vec<String> {
    let mut order: Vec<&Subtitle> = subs.iter().collect();
    order.sort_by_key(|sub| sub.start_ms);

    let mut new = Vec::with_capacity(lines.len());
    for (rank, sub) in order.iter().enumerate() {
        new.push((rank + 1).to_string());
        for pos in sub.timing_line()..sub.text_end() {
            new.push(lines.get(pos).cloned().unwrap_or_default());
        }
        new.push(String::new());
    }
    new
}
