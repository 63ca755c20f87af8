//! Caret-addressed edits of a single timing endpoint
//!
//! These commands patch individual timing lines in place via
//! [`srt_core::time::amend_start`] and [`srt_core::time::amend_end`],
//! so unrelated bytes of the line are preserved exactly.

use super::{CommandResult, SubtitleCommand};
use crate::core::{EditorError, LineEdit, Result};
use srt_core::time::{amend_end, amend_start, TimeMs, END_CARET_SPAN, START_CARET_SPAN};
use srt_core::Subtitle;

/// Which endpoint of a timing line the caret addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The start timecode
    Start,
    /// The end timecode
    End,
}

/// Map a caret column on a timing line to the endpoint it addresses.
/// Columns over the arrow (13..=15) address neither.
#[must_use]
pub fn endpoint_at_column(column: usize) -> Option<Endpoint> {
    if START_CARET_SPAN.contains(&column) {
        Some(Endpoint::Start)
    } else if END_CARET_SPAN.contains(&column) {
        Some(Endpoint::End)
    } else {
        None
    }
}

fn amend(lines: &[String], sub: &Subtitle, endpoint: Endpoint, ms: TimeMs) -> Result<LineEdit> {
    let pos = sub.timing_line();
    let line = lines
        .get(pos)
        .ok_or_else(|| EditorError::command_failed("timing line out of range"))?;
    let text = match endpoint {
        Endpoint::Start => amend_start(line, ms),
        Endpoint::End => amend_end(line, ms),
    }
    .ok_or_else(|| EditorError::command_failed("malformed duration line"))?;
    Ok(LineEdit::new(pos, text))
}

/// Shift one endpoint of record `at` by `delta` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTimeCommand {
    /// Record whose timing line is edited
    pub at: usize,
    /// Endpoint under the caret
    pub endpoint: Endpoint,
    /// Offset in milliseconds
    pub delta: TimeMs,
}

impl SubtitleCommand for ShiftTimeCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let sub = subs.get(self.at).ok_or(EditorError::NotInSubtitle)?;
        let new_ms = match self.endpoint {
            Endpoint::Start => sub.start_ms,
            Endpoint::End => sub.end_ms,
        } + self.delta;
        if new_ms < 0 {
            let which = match self.endpoint {
                Endpoint::Start => "start",
                Endpoint::End => "end",
            };
            return Err(EditorError::command_failed(format!(
                "{which} time cannot be negative"
            )));
        }
        let edit = amend(lines, sub, self.endpoint, new_ms)?;
        Ok(CommandResult::patched(vec![edit]))
    }

    fn description(&self) -> &str {
        "Shift time"
    }
}

/// Shift one endpoint and drag the colliding neighbour along.
///
/// Moving a start time earlier than the previous record's end plus the
/// minimum pause also pulls that end back; moving an end time past the
/// next record's start pushes that start out. A neighbour that would be
/// shrunk past its own other endpoint fails the whole command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTimeStrictCommand {
    /// Record whose timing line is edited
    pub at: usize,
    /// Endpoint under the caret
    pub endpoint: Endpoint,
    /// Offset in milliseconds
    pub delta: TimeMs,
    /// Pause to preserve towards the neighbour
    pub min_pause: TimeMs,
}

impl SubtitleCommand for ShiftTimeStrictCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let sub = subs.get(self.at).ok_or(EditorError::NotInSubtitle)?;
        let mut edits = Vec::with_capacity(2);
        match self.endpoint {
            Endpoint::Start => {
                let new_ms = sub.start_ms + self.delta;
                if new_ms < 0 {
                    return Err(EditorError::command_failed("start time cannot be negative"));
                }
                if self.at > 0 {
                    let prev = &subs[self.at - 1];
                    if new_ms < prev.end_ms + self.min_pause {
                        let new_prev_end = new_ms - self.min_pause;
                        if new_prev_end < prev.start_ms {
                            return Err(EditorError::command_failed(
                                "would shrink previous subtitle beyond start time",
                            ));
                        }
                        edits.push(amend(lines, prev, Endpoint::End, new_prev_end)?);
                    }
                }
                edits.push(amend(lines, sub, Endpoint::Start, new_ms)?);
            }
            Endpoint::End => {
                let new_ms = sub.end_ms + self.delta;
                if let Some(next) = subs.get(self.at + 1) {
                    if new_ms > next.start_ms - self.min_pause {
                        let new_next_start = new_ms + self.min_pause;
                        if new_next_start > next.end_ms {
                            return Err(EditorError::command_failed(
                                "would shrink next subtitle beyond end time",
                            ));
                        }
                        edits.push(amend(lines, next, Endpoint::Start, new_next_start)?);
                    }
                }
                edits.push(amend(lines, sub, Endpoint::End, new_ms)?);
            }
        }
        Ok(CommandResult::patched(edits))
    }

    fn description(&self) -> &str {
        "Shift time strictly"
    }
}

/// Make the neighbouring record yield the minimum pause.
///
/// On a start endpoint the previous record's end is pulled back to
/// `start - min_pause`; on an end endpoint the next record's start is
/// pushed out to `end + min_pause`. The record under the caret is never
/// edited. Situations where nothing can or needs to be done report a
/// message instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnforceCommand {
    /// Record whose endpoint anchors the pause
    pub at: usize,
    /// Endpoint under the caret
    pub endpoint: Endpoint,
    /// Pause to carve out, in milliseconds
    pub min_pause: TimeMs,
}

impl SubtitleCommand for EnforceCommand {
    fn apply(&self, lines: &[String], subs: &[Subtitle]) -> Result<CommandResult> {
        let sub = subs.get(self.at).ok_or(EditorError::NotInSubtitle)?;
        match self.endpoint {
            Endpoint::Start => {
                if self.at == 0 {
                    return Ok(CommandResult::noop("Can't apply this on the first subtitle"));
                }
                let prev = &subs[self.at - 1];
                let new_ms = sub.start_ms - self.min_pause;
                if new_ms >= prev.end_ms {
                    return Ok(CommandResult::noop("Nothing to be done"));
                }
                if new_ms < prev.start_ms {
                    return Ok(CommandResult::noop(
                        "Would shrink previous subtitle beyond start time",
                    ));
                }
                let edit = amend(lines, prev, Endpoint::End, new_ms)?;
                Ok(CommandResult::patched(vec![edit]))
            }
            Endpoint::End => {
                let Some(next) = subs.get(self.at + 1) else {
                    return Ok(CommandResult::noop("Can't apply this on the last subtitle"));
                };
                let new_ms = sub.end_ms + self.min_pause;
                if new_ms <= next.start_ms {
                    return Ok(CommandResult::noop("Nothing to be done"));
                }
                if new_ms > next.end_ms {
                    return Ok(CommandResult::noop(
                        "Would shrink next subtitle beyond end time",
                    ));
                }
                let edit = amend(lines, next, Endpoint::Start, new_ms)?;
                Ok(CommandResult::patched(vec![edit]))
            }
        }
    }

    fn description(&self) -> &str {
        "Enforce minimum pause"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::parsed;
    use crate::commands::Outcome;
    use pretty_assertions::assert_eq;

    const TIGHT: &str =
        "1\n00:00:01,000 --> 00:00:03,000\nA\n\n2\n00:00:03,200 --> 00:00:06,000\nB\n";

    #[test]
    fn caret_columns_map_to_endpoints() {
        assert_eq!(endpoint_at_column(0), Some(Endpoint::Start));
        assert_eq!(endpoint_at_column(12), Some(Endpoint::Start));
        assert_eq!(endpoint_at_column(13), None);
        assert_eq!(endpoint_at_column(15), None);
        assert_eq!(endpoint_at_column(16), Some(Endpoint::End));
        assert_eq!(endpoint_at_column(28), Some(Endpoint::End));
        assert_eq!(endpoint_at_column(29), None);
    }

    #[test]
    fn shift_time_patches_only_the_addressed_endpoint() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = ShiftTimeCommand {
            at: 0,
            endpoint: Endpoint::End,
            delta: 150,
        };
        let result = cmd.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.outcome,
            Outcome::Patched(vec![LineEdit::new(1, "00:00:01,000 --> 00:00:03,150")])
        );
    }

    #[test]
    fn shift_time_rejects_negative_times() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = ShiftTimeCommand {
            at: 0,
            endpoint: Endpoint::Start,
            delta: -1500,
        };
        let err = cmd.apply(&lines, &subs).unwrap_err();
        assert_eq!(err.to_string(), "start time cannot be negative");
    }

    #[test]
    fn strict_shift_drags_the_next_record_along() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = ShiftTimeStrictCommand {
            at: 0,
            endpoint: Endpoint::End,
            delta: 500,
            min_pause: 100,
        };
        let result = cmd.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.outcome,
            Outcome::Patched(vec![
                LineEdit::new(5, "00:00:03,600 --> 00:00:06,000"),
                LineEdit::new(1, "00:00:01,000 --> 00:00:03,500"),
            ])
        );
    }

    #[test]
    fn strict_shift_fails_when_the_neighbour_would_invert() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = ShiftTimeStrictCommand {
            at: 0,
            endpoint: Endpoint::End,
            delta: 3000,
            min_pause: 100,
        };
        let err = cmd.apply(&lines, &subs).unwrap_err();
        assert_eq!(err.to_string(), "would shrink next subtitle beyond end time");
    }

    #[test]
    fn strict_shift_of_the_first_start_needs_no_neighbour() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = ShiftTimeStrictCommand {
            at: 0,
            endpoint: Endpoint::Start,
            delta: -500,
            min_pause: 100,
        };
        let result = cmd.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.outcome,
            Outcome::Patched(vec![LineEdit::new(1, "00:00:00,500 --> 00:00:03,000")])
        );
    }

    #[test]
    fn strict_shift_pulls_the_previous_end_back() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = ShiftTimeStrictCommand {
            at: 1,
            endpoint: Endpoint::Start,
            delta: -150,
            min_pause: 100,
        };
        let result = cmd.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.outcome,
            Outcome::Patched(vec![
                LineEdit::new(1, "00:00:01,000 --> 00:00:02,950"),
                LineEdit::new(5, "00:00:03,050 --> 00:00:06,000"),
            ])
        );
    }

    #[test]
    fn enforce_start_pulls_the_previous_end() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = EnforceCommand {
            at: 1,
            endpoint: Endpoint::Start,
            min_pause: 300,
        };
        let result = cmd.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.outcome,
            Outcome::Patched(vec![LineEdit::new(1, "00:00:01,000 --> 00:00:02,900")])
        );
    }

    #[test]
    fn enforce_reports_when_nothing_needs_doing() {
        let (lines, subs) = parsed(TIGHT);
        let cmd = EnforceCommand {
            at: 1,
            endpoint: Endpoint::Start,
            min_pause: 100,
        };
        let result = cmd.apply(&lines, &subs).unwrap();
        assert_eq!(result.outcome, Outcome::NoOp);
        assert_eq!(result.message.as_deref(), Some("Nothing to be done"));
    }

    #[test]
    fn enforce_on_the_edges_is_informational() {
        let (lines, subs) = parsed(TIGHT);
        let first = EnforceCommand {
            at: 0,
            endpoint: Endpoint::Start,
            min_pause: 100,
        };
        let result = first.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.message.as_deref(),
            Some("Can't apply this on the first subtitle")
        );
        let last = EnforceCommand {
            at: 1,
            endpoint: Endpoint::End,
            min_pause: 100,
        };
        let result = last.apply(&lines, &subs).unwrap();
        assert_eq!(
            result.message.as_deref(),
            Some("Can't apply this on the last subtitle")
        );
    }
}
