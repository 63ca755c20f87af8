//! Merge another subtitle document into the current one

use super::sort::sorted_lines;
use super::{CommandResult, SubtitleCommand};
use crate::core::{EditorError, Result};
use srt_core::time::{duration_line, TimeMs};
use srt_core::{parse_subtitles, Subtitle};

/// Append another document's records, shifted by `offset`, then re-sort
/// the combined document into start order.
///
/// The donor document must parse cleanly on its own. The combined
/// document is re-parsed before sorting; a failure there points at a
/// line of the already-concatenated buffer, which the error variant
/// calls out explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCommand {
    /// Lines of the donor document
    pub other: Vec<String>,
    /// Offset applied to every donor record, in milliseconds
    pub offset: TimeMs,
}

impl SubtitleCommand for ImportCommand {
    fn apply(&self, lines: &[String], _subs: &[Subtitle]) -> Result<CommandResult> {
        let donor_subs = parse_subtitles(&self.other)?;

        let mut shifted = self.other.clone();
        for sub in &donor_subs {
            if let Some(slot) = shifted.get_mut(sub.timing_line()) {
                *slot = duration_line(sub.start_ms + self.offset, sub.end_ms + self.offset);
            }
        }

        let mut combined = lines.to_vec();
        // A missing trailing separator would glue the last record to the
        // donor's first index line.
        if combined.last().is_some_and(|l| !l.is_empty()) {
            combined.push(String::new());
        }
        combined.extend(shifted);

        let combined_subs = parse_subtitles(&combined).map_err(EditorError::ImportReparse)?;
        Ok(CommandResult::replaced(sorted_lines(&combined, &combined_subs))
            .with_message(format!("Imported {} subtitles", donor_subs.len())))
    }

    fn description(&self) -> &str {
        "Import subtitles"
    }
}
