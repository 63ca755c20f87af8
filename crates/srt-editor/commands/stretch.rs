//! Linearly remap a range of subtitles onto a new time span

use super::{CommandResult, SubtitleCommand};
use crate::core::{EditorError, Result};
use srt_core::time::{duration_line, parse_flexible, TimeMs};
use srt_core::Subtitle;

/// Which end of a record a stretch anchor refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeAnchor {
    /// The record's start time
    #[default]
    Start,
    /// The record's end time
    End,
}

/// Parse a stretch anchor: a flexible timecode with an optional trailing
/// `S` or `E` marker selecting which endpoint of the record it pins.
/// Without a marker the start time is assumed.
#[must_use]
pub fn parse_anchor_time(input: &str) -> Option<(TimeMs, TimeAnchor)> {
    let input = input.trim();
    let (body, anchor) = match input.as_bytes().last() {
        Some(b'S' | b's') => (&input[..input.len() - 1], TimeAnchor::Start),
        Some(b'E' | b'e') => (&input[..input.len() - 1], TimeAnchor::End),
        _ => (input, TimeAnchor::Start),
    };
    parse_flexible(body).map(|ms| (ms, anchor))
}

/// Remap records `first..=last` so the two anchor points land on the
/// given new times; everything in between scales linearly.
///
/// Both endpoints of every record are remapped with the same affine
/// transform, so relative pacing inside the range is preserved. The
/// whole range is validated before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchCommand {
    /// First record of the range
    pub first: usize,
    /// Last record of the range, inclusive
    pub last: usize,
    /// Which endpoint of the first record is pinned
    pub first_anchor: TimeAnchor,
    /// Which endpoint of the last record is pinned
    pub last_anchor: TimeAnchor,
    /// New time for the first anchor
    pub new_first: TimeMs,
    /// New time for the last anchor
    pub new_last: TimeMs,
}

impl StretchCommand {
    fn remap(&self, old_origin: TimeMs, scale: f64, ms: TimeMs) -> TimeMs {
        let rel = (ms - old_origin) as f64 * scale;
        self.new_first + rel.floor() as TimeMs
    }
}

impl SubtitleCommand for StretchCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        if self.first > self.last || self.last >= subs.len() {
            return Err(EditorError::NotInSubtitle);
        }
        let anchor_of = |sub: &Subtitle, anchor: TimeAnchor| match anchor {
            TimeAnchor::Start => sub.start_ms,
            TimeAnchor::End => sub.end_ms,
        };
        let old_first = anchor_of(&subs[self.first], self.first_anchor);
        let old_last = anchor_of(&subs[self.last], self.last_anchor);
        if old_first == old_last {
            return Err(EditorError::command_failed(
                "cannot stretch a range with zero duration",
            ));
        }
        let scale = (self.new_last - self.new_first) as f64 / (old_last - old_first) as f64;

        let mut remapped = Vec::with_capacity(self.last - self.first + 1);
        for sub in &subs[self.first..=self.last] {
            let start = self.remap(old_first, scale, sub.start_ms);
            let end = self.remap(old_first, scale, sub.end_ms);
            if start < 0 {
                return Err(EditorError::command_failed(format!(
                    "stretch would give subtitle {} a negative start time",
                    sub.index
                )));
            }
            if start > end {
                return Err(EditorError::command_failed(format!(
                    "stretch would give subtitle {} a negative duration",
                    sub.index
                )));
            }
            remapped.push((sub.timing_line(), start, end));
        }

        let mut new = lines.to_vec();
        for (pos, start, end) in remapped {
            if let Some(slot) = new.get_mut(pos) {
                *slot = duration_line(start, end);
            }
        }
        let count = self.last - self.first + 1;
        Ok(CommandResult::replaced(new).with_message(format!("Modified {count} subtitles")))
    }

    fn description(&self) -> &str {
        "Stretch subtitles"
    }
}
