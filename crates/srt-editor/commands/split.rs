//! Split one subtitle record into two

use super::{renumber_tail, CommandResult, SubtitleCommand};
use crate::core::{EditorError, Result};
use srt_core::time::{duration_line, TimeMs};
use srt_core::Subtitle;

/// How the split point in time is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Split in proportion to the character weight of each half
    #[default]
    Length,
    /// Split at the temporal midpoint
    Half,
}

/// Split record `at` into two records of equal line count.
///
/// The first half keeps the record's index and start time; the second
/// half gets a freshly inserted index, timing line and separator. The
/// configured pause is shaved off both sides of the split point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCommand {
    /// Record to split
    pub at: usize,
    /// Split point selection
    pub strategy: SplitStrategy,
    /// Milliseconds shaved off each side of the split point
    pub pause: TimeMs,
}

impl SubtitleCommand for SplitCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let sub = subs.get(self.at).ok_or(EditorError::NotInSubtitle)?;
        let text_lines = sub.line_lengths.len();
        if text_lines == 0 || text_lines % 2 != 0 {
            return Err(EditorError::command_failed(
                "only subtitles with an even number of lines can be split",
            ));
        }
        let half = text_lines / 2;
        let split_ms = self.split_point(sub, half);

        let mut new = lines.to_vec();
        renumber_tail(&mut new, subs, self.at + 1, 1);
        if let Some(slot) = new.get_mut(sub.timing_line()) {
            *slot = duration_line(sub.start_ms, split_ms - self.pause);
        }
        let insert_at = (sub.text_start() + half).min(new.len());
        new.splice(
            insert_at..insert_at,
            [
                String::new(),
                sub.index.saturating_add(1).to_string(),
                duration_line(split_ms + self.pause, sub.end_ms),
            ],
        );
        Ok(CommandResult::replaced(new))
    }

    fn description(&self) -> &str {
        "Split subtitle"
    }
}

impl SplitCommand {
    fn split_point(&self, sub: &Subtitle, half: usize) -> TimeMs {
        let midpoint = sub.start_ms + sub.duration_ms / 2;
        match self.strategy {
            SplitStrategy::Half => midpoint,
            SplitStrategy::Length => {
                let first: usize = sub.line_lengths[..half].iter().sum();
                let total: usize = sub.line_lengths.iter().sum();
                if total == 0 {
                    midpoint
                } else {
                    sub.start_ms + sub.duration_ms * first as TimeMs / total as TimeMs
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::{lines, parsed};
    use pretty_assertions::assert_eq;
    use srt_core::parse_subtitles;

    // One record, two text lines of weights 4 and 14, spanning 0s..4s.
    const TWO_LINE: &str = "1\n00:00:00,000 --> 00:00:04,000\nHiya\nLonger bottom.\n";

    #[test]
    fn length_split_is_weighted_by_characters() {
        let (doc, subs) = parsed(TWO_LINE);
        let cmd = SplitCommand {
            at: 0,
            strategy: SplitStrategy::Length,
            pause: 50,
        };
        let result = cmd.apply(&doc, &subs).unwrap();
        let crate::commands::Outcome::Replaced(new) = result.outcome else {
            panic!("expected replacement");
        };
        // 4 of 18 chars: split point at 888ms, minus/plus the pause
        assert_eq!(
            new,
            lines("1\n00:00:00,000 --> 00:00:00,838\nHiya\n\n2\n00:00:00,938 --> 00:00:04,000\nLonger bottom.\n")
        );
    }

    #[test]
    fn half_split_uses_the_temporal_midpoint() {
        let (doc, subs) = parsed(TWO_LINE);
        let cmd = SplitCommand {
            at: 0,
            strategy: SplitStrategy::Half,
            pause: 0,
        };
        let result = cmd.apply(&doc, &subs).unwrap();
        let crate::commands::Outcome::Replaced(new) = result.outcome else {
            panic!("expected replacement");
        };
        let subs = parse_subtitles(&new).unwrap();
        assert_eq!(subs[0].end_ms, 2000);
        assert_eq!(subs[1].start_ms, 2000);
    }

    #[test]
    fn odd_line_counts_are_rejected() {
        let (doc, subs) = parsed("1\n00:00:00,000 --> 00:00:04,000\nOnly one line\n");
        let cmd = SplitCommand {
            at: 0,
            strategy: SplitStrategy::Length,
            pause: 0,
        };
        let err = cmd.apply(&doc, &subs).unwrap_err();
        assert!(err.to_string().contains("even number of lines"));
    }

    #[test]
    fn later_records_are_renumbered_up() {
        let (doc, subs) = parsed(
            "1\n00:00:00,000 --> 00:00:04,000\nTop\nBottom\n\n2\n00:00:05,000 --> 00:00:06,000\nAfter\n",
        );
        let cmd = SplitCommand {
            at: 0,
            strategy: SplitStrategy::Half,
            pause: 0,
        };
        let result = cmd.apply(&doc, &subs).unwrap();
        let crate::commands::Outcome::Replaced(new) = result.outcome else {
            panic!("expected replacement");
        };
        let subs = parse_subtitles(&new).unwrap();
        assert_eq!(subs.len(), 3);
        assert_eq!(
            subs.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(subs[2].start_ms, 5000);
    }
}
