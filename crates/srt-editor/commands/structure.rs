//! Document structure commands: indices, order, insertion, cleanup

use super::sort::sorted_lines;
use super::{CommandResult, SubtitleCommand};
use crate::core::{EditorError, LineEdit, Result};
use srt_core::time::{duration_line, TimeMs};
use srt_core::{parse_subtitles, ParseErrorKind, Subtitle};

/// Runaway guard for the empty-line sweep.
const DELETE_PASS_LIMIT: usize = 1000;

/// Rewrite every index line to its record's 1-based position.
///
/// Only out-of-sequence index lines are touched, so a well-numbered
/// document produces no edit at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixIndicesCommand;

impl SubtitleCommand for FixIndicesCommand {
    fn apply(&self, _lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let edits: Vec<LineEdit> = subs
            .iter()
            .enumerate()
            .filter(|(rank, sub)| sub.index != (rank + 1) as i64)
            .map(|(rank, sub)| LineEdit::new(sub.line_pos, (rank + 1).to_string()))
            .collect();
        if edits.is_empty() {
            return Ok(CommandResult::noop("Indices already sequential"));
        }
        let count = edits.len();
        Ok(CommandResult::patched(edits).with_message(format!("Fixed {count} indices")))
    }

    fn description(&self) -> &str {
        "Fix indices"
    }
}

/// Swap the text of record `at` with its successor; timings stay put.
///
/// On the last record the swap is taken with the predecessor instead, so
/// the command is usable from either side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCommand {
    /// Record to swap forward
    pub at: usize,
}

impl SubtitleCommand for SwapCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        if subs.len() < 2 {
            return Err(EditorError::command_failed(
                "not enough subtitles to swap anything",
            ));
        }
        let at = self.at.min(subs.len() - 2);
        let a = &subs[at];
        let b = &subs[at + 1];

        let slice = |from: usize, to: usize| lines.get(from..to).unwrap_or_default();
        let mut new = Vec::with_capacity(lines.len());
        new.extend_from_slice(slice(0, a.text_start()));
        new.extend_from_slice(slice(b.text_start(), b.text_end()));
        new.extend_from_slice(slice(a.text_end(), b.text_start()));
        new.extend_from_slice(slice(a.text_start(), a.text_end()));
        new.extend_from_slice(slice(b.text_end(), lines.len()));
        Ok(CommandResult::replaced(new))
    }

    fn description(&self) -> &str {
        "Swap subtitle text"
    }
}

/// Insert a fresh empty record after record `after`.
///
/// The new record starts `pause` after its predecessor's end, lasts
/// `min_duration`, and the document is re-sorted so its index lines come
/// out sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddCommand {
    /// Record the new one is inserted after
    pub after: usize,
    /// Gap between the predecessor's end and the new start
    pub pause: TimeMs,
    /// Duration of the new record
    pub min_duration: TimeMs,
}

impl SubtitleCommand for AddCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let sub = subs.get(self.after).ok_or(EditorError::NotInSubtitle)?;
        let start = sub.end_ms + self.pause;
        let mut new = lines.to_vec();
        let insert_at = sub.text_end().min(new.len());
        new.splice(
            insert_at..insert_at,
            [
                String::new(),
                sub.index.saturating_add(1).to_string(),
                duration_line(start, start + self.min_duration),
            ],
        );
        let resubs = parse_subtitles(&new)?;
        Ok(CommandResult::replaced(sorted_lines(&new, &resubs)))
    }

    fn description(&self) -> &str {
        "Add subtitle"
    }
}

/// Sweep out blank lines that split records apart.
///
/// The parser reports a leading blank on an index position as a healable
/// error; this command repeatedly deletes the offending blank and
/// re-parses until the document is clean. Any other parse error stops
/// the sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteEmptyLinesCommand;

impl SubtitleCommand for DeleteEmptyLinesCommand {
    fn apply(&self, lines: &[String], _subs: &[Subtitle]) -> Result<CommandResult> {
        let mut current = lines.to_vec();
        let mut deleted = 0usize;
        let mut warnings = Vec::new();
        for pass in 0.. {
            if pass >= DELETE_PASS_LIMIT {
                warnings.push(format!("gave up after {DELETE_PASS_LIMIT} passes"));
                break;
            }
            if current.len() < 3 {
                break;
            }
            match parse_subtitles(&current) {
                Ok(_) => break,
                Err(err) if err.kind == ParseErrorKind::BadIndexLine => {
                    let target = err.line.saturating_sub(1);
                    if target >= current.len() || !current[target].is_empty() {
                        return Err(EditorError::command_failed(format!(
                            "error other than an empty line found on line {}",
                            err.line
                        )));
                    }
                    current.remove(target);
                    deleted += 1;
                }
                Err(err) => {
                    return Err(EditorError::command_failed(format!(
                        "error other than reading index found on line {}: {err}",
                        err.line
                    )));
                }
            }
        }
        if deleted == 0 {
            return Ok(CommandResult::noop("No empty lines to delete").with_warnings(warnings));
        }
        Ok(CommandResult::replaced(current)
            .with_message(format!("Deleted {deleted} empty lines"))
            .with_warnings(warnings))
    }

    fn description(&self) -> &str {
        "Delete empty lines"
    }
}

/// Line position of the record with 1-based index `index`, if any.
#[must_use]
pub fn jump_target(subs: &[Subtitle], index: i64) -> Option<usize> {
    if index < 1 {
        return None;
    }
    subs.get(index as usize - 1).map(|sub| sub.line_pos)
}
