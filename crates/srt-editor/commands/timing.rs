//! Repair overlapping and too-tight timings

use super::{CommandResult, SubtitleCommand};
use crate::config::EditorConfig;
use crate::core::{EditorError, Result};
use srt_core::time::{duration_line, TimeMs};
use srt_core::Subtitle;

/// Timing constraints a repair must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRules {
    /// Required gap between consecutive records, in milliseconds
    pub min_pause: TimeMs,
    /// Shortest duration a repair may leave behind
    pub min_duration: TimeMs,
    /// Also repair records that merely undercut the minimum pause
    pub fix_bad_min_pause: bool,
    /// Leave the full minimum pause after shrinking, not just no overlap
    pub fix_with_min_pause: bool,
}

impl TimingRules {
    /// Project the relevant knobs out of the editor configuration.
    #[must_use]
    pub const fn from_config(config: &EditorConfig) -> Self {
        Self {
            min_pause: config.min_pause,
            min_duration: config.min_duration,
            fix_bad_min_pause: config.fix_bad_min_pause,
            fix_with_min_pause: config.fix_with_min_pause,
        }
    }
}

/// Shrink record `at` so it no longer collides with its successor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixTimingCommand {
    /// Record to repair
    pub at: usize,
    /// Constraints for the repair
    pub rules: TimingRules,
}

impl SubtitleCommand for FixTimingCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let sub = subs.get(self.at).ok_or(EditorError::NotInSubtitle)?;
        let Some(next) = subs.get(self.at + 1) else {
            return Ok(CommandResult::noop(format!(
                "nothing to fix for subtitle {}",
                sub.index
            )));
        };
        let mut new = lines.to_vec();
        match fix_pair(&mut new, sub, next, self.rules) {
            Ok(true) => Ok(CommandResult::replaced(new)
                .with_message(format!("Fixed timing for subtitle {}", sub.index))),
            Ok(false) => Ok(CommandResult::noop(format!(
                "nothing to fix for subtitle {}",
                sub.index
            ))),
            Err(message) => Err(EditorError::command_failed(message)),
        }
    }

    fn description(&self) -> &str {
        "Fix timing"
    }
}

/// Repair every consecutive pair in the document.
///
/// Pairs that cannot be repaired are reported as warnings; the rest of
/// the document is still fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixTimingAllCommand {
    /// Constraints for each repair
    pub rules: TimingRules,
}

impl SubtitleCommand for FixTimingAllCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let mut new = lines.to_vec();
        let mut fixed = 0usize;
        let mut warnings = Vec::new();
        for pair in subs.windows(2) {
            match fix_pair(&mut new, &pair[0], &pair[1], self.rules) {
                Ok(true) => fixed += 1,
                Ok(false) => {}
                Err(message) => warnings.push(message),
            }
        }
        if fixed == 0 {
            return Ok(CommandResult::noop("No timings to fix").with_warnings(warnings));
        }
        Ok(CommandResult::replaced(new)
            .with_message(format!("Fixed timings for {fixed} subtitles"))
            .with_warnings(warnings))
    }

    fn description(&self) -> &str {
        "Fix all timings"
    }
}

/// Shrink `sub` away from `next` if they collide.
///
/// All decisions read the parsed snapshot, so running this over every
/// pair of a document stays consistent even though the line list is
/// being rewritten along the way: each call only touches its own
/// record's timing line.
fn fix_pair(
    lines: &mut [String],
    sub: &Subtitle,
    next: &Subtitle,
    rules: TimingRules,
) -> core::result::Result<bool, String> {
    if sub.start_ms > sub.end_ms {
        return Err(format!("subtitle {} has a negative duration", sub.index));
    }
    let collides = sub.end_ms > next.start_ms
        || (rules.fix_bad_min_pause && sub.end_ms > next.start_ms - rules.min_pause);
    if !collides {
        return Ok(false);
    }
    let pause = if rules.fix_with_min_pause {
        rules.min_pause
    } else {
        0
    };
    let new_end = next.start_ms - pause;
    if new_end - sub.start_ms < rules.min_duration {
        return Err(format!(
            "can't shrink subtitle {}, would break the minimum duration",
            sub.index
        ));
    }
    if let Some(slot) = lines.get_mut(sub.timing_line()) {
        *slot = duration_line(sub.start_ms, new_end);
    }
    Ok(true)
}
