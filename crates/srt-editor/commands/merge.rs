//! Merge adjacent subtitle records
//!
//! The merged record keeps the first record's start time and text lines
//! and adopts the second record's end time; the second record's text
//! lines are dropped. All subsequent indices are renumbered down by one.

use super::{renumber_tail, CommandResult, SubtitleCommand};
use crate::core::{EditorError, Result};
use srt_core::time::duration_line;
use srt_core::{parse_subtitles, Subtitle};

/// Merge records `first..=last` into one, pairwise from the front.
///
/// With a multi-record selection each step re-parses the intermediate
/// document, because every merge shifts the line positions of everything
/// after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCommand {
    /// Record index the merge starts at
    pub first: usize,
    /// Last record index folded into `first`
    pub last: usize,
}

impl MergeCommand {
    /// Merge a record with its successor.
    #[must_use]
    pub const fn pair(first: usize) -> Self {
        Self {
            first,
            last: first + 1,
        }
    }
}

impl SubtitleCommand for MergeCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        if self.first + 1 >= subs.len() {
            return Err(EditorError::command_failed("can't merge the last subtitle"));
        }
        let last = self.last.clamp(self.first + 1, subs.len() - 1);

        let mut current = lines.to_vec();
        for step in self.first..last {
            let snapshot = if step == self.first {
                subs.to_vec()
            } else {
                parse_subtitles(&current)?
            };
            if self.first + 1 >= snapshot.len() {
                break;
            }
            current = merge_pair(&current, &snapshot, self.first);
        }
        Ok(CommandResult::replaced(current))
    }

    fn description(&self) -> &str {
        "Merge subtitles"
    }
}

/// Fold `subs[i + 1]` into `subs[i]` on a fresh line list.
fn merge_pair(lines: &[String], subs: &[Subtitle], i: usize) -> Vec<String> {
    let sub = &subs[i];
    let next = &subs[i + 1];

    let mut new = lines.to_vec();
    renumber_tail(&mut new, subs, i + 1, -1);
    if let Some(slot) = new.get_mut(sub.timing_line()) {
        *slot = duration_line(sub.start_ms, next.end_ms);
    }

    // Remove the second record's block: separator blank, index line,
    // timing line and text lines. Its trailing blank becomes the merged
    // record's separator.
    let del_from = next.line_pos - 1;
    let del_to = (del_from + 3 + next.line_lengths.len()).min(new.len());
    new.drain(del_from..del_to);
    new
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::{parsed, THREE, TWO};
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_keeps_first_text_and_adopts_second_end() {
        let (lines, subs) = parsed(TWO);
        let result = MergeCommand::pair(0).apply(&lines, &subs).unwrap();
        let crate::commands::Outcome::Replaced(new) = result.outcome else {
            panic!("expected replacement");
        };
        assert_eq!(
            new,
            vec!["1", "00:00:01,000 --> 00:00:06,000", "Hello", ""]
        );
    }

    #[test]
    fn merge_renumbers_subsequent_records() {
        let (lines, subs) = parsed(THREE);
        let result = MergeCommand::pair(0).apply(&lines, &subs).unwrap();
        let crate::commands::Outcome::Replaced(new) = result.outcome else {
            panic!("expected replacement");
        };
        let merged = parse_subtitles(&new).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].index, 1);
        assert_eq!(merged[0].start_ms, 1000);
        assert_eq!(merged[0].end_ms, 6000);
        assert_eq!(merged[0].line_lengths, vec![3]);
        assert_eq!(merged[1].index, 2);
        assert_eq!(merged[1].start_ms, 7000);
    }

    #[test]
    fn merging_the_last_record_fails() {
        let (lines, subs) = parsed(TWO);
        let err = MergeCommand::pair(1).apply(&lines, &subs).unwrap_err();
        assert_eq!(err.to_string(), "can't merge the last subtitle");
        // all-or-nothing: nothing was returned, the input is untouched
    }

    #[test]
    fn selection_merge_folds_several_records() {
        let (lines, subs) = parsed(THREE);
        let result = MergeCommand { first: 0, last: 2 }.apply(&lines, &subs).unwrap();
        let crate::commands::Outcome::Replaced(new) = result.outcome else {
            panic!("expected replacement");
        };
        let merged = parse_subtitles(&new).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start_ms, 1000);
        assert_eq!(merged[0].end_ms, 9000);
        assert_eq!(merged[0].line_lengths, vec![3]);
    }
}
