//! Lenient annotation scan for live editor hints and diagnostics
//!
//! Runs the same three-state machine as the strict parser but tolerates
//! malformed input: a bad index or timing line becomes a diagnostic and
//! the scan continues, resyncing at the next blank line. The scanner is
//! re-run from scratch on every change notification, so it keeps no
//! incremental state and must never panic on arbitrary in-progress text.
//!
//! Per completed record it emits an inter-record pause hint (attached at
//! the blank separator before the record) and a duration /
//! characters-per-second hint (attached at the duration line), plus
//! diagnostics for non-sequential indices, overlap or reordering against
//! the predecessor, pauses below the configured minimum, and an
//! unterminated final record.

use crate::parser::{parse_index_line, stripped_len};
use crate::time::{format_seconds, format_signed_seconds, parse_duration_line, TimeMs};
use core::fmt;

/// Display toggles and thresholds consumed by the scanner.
///
/// A projection of the host configuration; the host decides whether the
/// scan runs at all (master toggle) before calling [`scan`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Minimum inter-subtitle gap in ms; `0` disables short-pause warnings
    pub min_pause: TimeMs,
    /// Characters-per-second threshold for warnings and percentages
    pub max_cps: f64,
    /// Always include the CPS figure in duration hints
    pub show_cps: bool,
    /// Include the CPS figure when it exceeds `max_cps`
    pub cps_warning: bool,
    /// Emit pause hints at record separators
    pub show_pause: bool,
    /// Emit overlap warnings against the previous record
    pub overlap_warning: bool,
    /// Include the total character count in duration hints
    pub show_length: bool,
    /// Pad hint text with a leading space for inlay rendering
    pub extra_spaces: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_pause: 0,
            max_cps: 21.0,
            show_cps: false,
            cps_warning: true,
            show_pause: true,
            overlap_warning: true,
            show_length: false,
            extra_spaces: true,
        }
    }
}

/// Severity of a scan diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, no action required
    Info,
    /// Should be addressed but the document still works
    Warning,
    /// The document is malformed at this line
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What a hint annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    /// Gap between the previous record's end and this record's start
    Pause,
    /// Display duration and characters-per-second of a record
    Duration,
}

/// Inlay hint attached at the end of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// Zero-based line the hint is attached to
    pub line: usize,
    /// What the hint annotates
    pub kind: HintKind,
    /// Rendered hint text
    pub text: String,
}

/// Diagnostic attached to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Zero-based line the diagnostic points at
    pub line: usize,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
}

/// Full result of one scan pass, rebuilt from scratch every time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Inlay hints in document order
    pub hints: Vec<Hint>,
    /// Diagnostics in document order
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Index,
    Timing,
    Subtitle,
    /// Skip lines until the next blank after a garbled timing line.
    Recover,
}

/// In-progress accounting for the record currently being read.
struct Pending {
    timing_line: usize,
    start: TimeMs,
    end: TimeMs,
    chars: usize,
}

/// Scan a line list for hints and diagnostics.
///
/// Tolerant counterpart of [`crate::parser::parse_subtitles`]: malformed
/// lines yield diagnostics instead of aborting, so the scan can run on
/// every keystroke over half-edited text.
#[must_use]
pub fn scan(lines: &[String], config: &ScanConfig) -> ScanReport {
    let mut report = ScanReport::default();
    let mut state = ScanState::Index;
    let mut pending: Option<Pending> = None;
    let mut last_index: Option<i64> = None;
    let mut prev_start: Option<TimeMs> = None;
    let mut prev_end: Option<TimeMs> = None;
    let mut separator_line: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        match state {
            ScanState::Index => {
                if line.is_empty() {
                    separator_line = Some(i);
                    continue;
                }
                match parse_index_line(line) {
                    Some(index) => {
                        if let Some(last) = last_index {
                            // Clamped oversized indices make MAX reachable.
                            let expected = last.saturating_add(1);
                            if index != expected {
                                report.diagnostics.push(Diagnostic {
                                    line: i,
                                    severity: Severity::Warning,
                                    message: format!(
                                        "non-sequential index {index}, expected {expected}"
                                    ),
                                });
                            }
                        }
                        last_index = Some(index);
                        state = ScanState::Timing;
                    }
                    None => {
                        report.diagnostics.push(Diagnostic {
                            line: i,
                            severity: Severity::Error,
                            message: format!("bad index line: {line:?}"),
                        });
                    }
                }
            }
            ScanState::Timing => match parse_duration_line(line) {
                Some((start, end)) => {
                    if let Some(pe) = prev_end {
                        let pause = start - pe;
                        if config.show_pause {
                            report.hints.push(Hint {
                                line: separator_line.unwrap_or(i),
                                kind: HintKind::Pause,
                                text: pad(config, format_signed_seconds(pause)),
                            });
                        }
                        if prev_start.is_some_and(|ps| start < ps) {
                            report.diagnostics.push(Diagnostic {
                                line: i,
                                severity: Severity::Error,
                                message: "subtitle starts before its predecessor".to_string(),
                            });
                        } else if start < pe {
                            if config.overlap_warning {
                                report.diagnostics.push(Diagnostic {
                                    line: i,
                                    severity: Severity::Warning,
                                    message: "subtitle overlaps the previous one".to_string(),
                                });
                            }
                        } else if config.min_pause > 0 && pause < config.min_pause {
                            report.diagnostics.push(Diagnostic {
                                line: i,
                                severity: Severity::Warning,
                                message: format!(
                                    "pause {} is below the minimum {}",
                                    format_seconds(pause),
                                    format_seconds(config.min_pause)
                                ),
                            });
                        }
                    }
                    pending = Some(Pending {
                        timing_line: i,
                        start,
                        end,
                        chars: 0,
                    });
                    state = ScanState::Subtitle;
                }
                None => {
                    report.diagnostics.push(Diagnostic {
                        line: i,
                        severity: Severity::Error,
                        message: "bad timing line".to_string(),
                    });
                    // Accounting for this record is lost; resync at a blank.
                    state = ScanState::Recover;
                }
            },
            ScanState::Subtitle => {
                if line.is_empty() {
                    if let Some(done) = pending.take() {
                        finish_record(config, &done, &mut report);
                        prev_start = Some(done.start);
                        prev_end = Some(done.end);
                    }
                    separator_line = Some(i);
                    state = ScanState::Index;
                } else if let Some(p) = pending.as_mut() {
                    p.chars += stripped_len(line);
                }
            }
            ScanState::Recover => {
                if line.is_empty() {
                    separator_line = Some(i);
                    state = ScanState::Index;
                }
            }
        }
    }

    match state {
        ScanState::Subtitle => {
            if let Some(done) = pending.take() {
                finish_record(config, &done, &mut report);
            }
            report.diagnostics.push(Diagnostic {
                line: lines.len().saturating_sub(1),
                severity: Severity::Error,
                message: "unterminated final subtitle".to_string(),
            });
        }
        ScanState::Timing => {
            report.diagnostics.push(Diagnostic {
                line: lines.len().saturating_sub(1),
                severity: Severity::Error,
                message: "unterminated final subtitle".to_string(),
            });
        }
        ScanState::Index | ScanState::Recover => {}
    }

    report
}

fn finish_record(config: &ScanConfig, record: &Pending, report: &mut ScanReport) {
    let duration = record.end - record.start;
    let mut parts = vec![format_seconds(duration)];
    if config.show_length {
        parts.push(format!("{} chars", record.chars));
    }

    if duration > 0 {
        #[allow(clippy::cast_precision_loss)]
        let cps = record.chars as f64 / duration as f64 * 1000.0;
        if config.show_cps || (config.cps_warning && cps > config.max_cps) {
            if config.max_cps > 0.0 {
                parts.push(format!("{cps:.1} CPS ({:.0}%)", cps / config.max_cps * 100.0));
            } else {
                parts.push(format!("{cps:.1} CPS"));
            }
        }
    } else if config.show_cps {
        // Zero or negative duration: CPS is undefined, never a number.
        parts.push("CPS n/a".to_string());
    }

    report.hints.push(Hint {
        line: record.timing_line,
        kind: HintKind::Duration,
        text: pad(config, parts.join(" | ")),
    });
}

fn pad(config: &ScanConfig, text: String) -> String {
    if config.extra_spaces {
        format!(" {text}")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    fn quiet_config() -> ScanConfig {
        ScanConfig {
            extra_spaces: false,
            ..ScanConfig::default()
        }
    }

    const CLEAN: &str = "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:03,500 --> 00:00:05,000\nWorld\n";

    #[test]
    fn clean_document_yields_hints_and_no_diagnostics() {
        let report = scan(&lines(CLEAN), &quiet_config());
        assert_eq!(report.diagnostics, vec![]);

        // duration hints at both timing lines, pause hint at the separator
        let durations: Vec<_> = report
            .hints
            .iter()
            .filter(|h| h.kind == HintKind::Duration)
            .collect();
        assert_eq!(durations.len(), 2);
        assert_eq!(durations[0].line, 1);
        assert_eq!(durations[0].text, "2.000");
        assert_eq!(durations[1].line, 5);
        assert_eq!(durations[1].text, "1.500");

        let pauses: Vec<_> = report
            .hints
            .iter()
            .filter(|h| h.kind == HintKind::Pause)
            .collect();
        assert_eq!(pauses.len(), 1);
        assert_eq!(pauses[0].line, 3);
        assert_eq!(pauses[0].text, "+0.500");
    }

    #[test]
    fn cps_is_shown_when_always_on() {
        let config = ScanConfig {
            show_cps: true,
            extra_spaces: false,
            ..ScanConfig::default()
        };
        let report = scan(
            &lines("1\n00:00:01,000 --> 00:00:02,000\nHello hello hello hell\n"),
            &config,
        );
        let hint = report
            .hints
            .iter()
            .find(|h| h.kind == HintKind::Duration)
            .unwrap();
        // 22 chars over 1s, threshold 21 -> 105%
        assert_eq!(hint.text, "1.000 | 22.0 CPS (105%)");
    }

    #[test]
    fn cps_warning_fires_only_above_threshold() {
        let config = quiet_config();
        let calm = scan(&lines("1\n00:00:01,000 --> 00:00:03,000\nHi\n"), &config);
        let hint = calm.hints.iter().find(|h| h.kind == HintKind::Duration).unwrap();
        assert_eq!(hint.text, "2.000");

        let busy = scan(
            &lines("1\n00:00:01,000 --> 00:00:02,000\nHello hello hello hello hello\n"),
            &config,
        );
        let hint = busy.hints.iter().find(|h| h.kind == HintKind::Duration).unwrap();
        assert!(hint.text.contains("CPS"), "{}", hint.text);
    }

    #[test]
    fn zero_duration_reports_undefined_cps() {
        let config = ScanConfig {
            show_cps: true,
            extra_spaces: false,
            ..ScanConfig::default()
        };
        let report = scan(&lines("1\n00:00:01,000 --> 00:00:01,000\nHello\n"), &config);
        let hint = report.hints.iter().find(|h| h.kind == HintKind::Duration).unwrap();
        assert_eq!(hint.text, "0.000 | CPS n/a");
    }

    #[test]
    fn bad_lines_become_diagnostics_and_scan_continues() {
        let text = "x\n1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\nnot a timing line\nB\n\n3\n00:00:05,000 --> 00:00:06,000\nC\n";
        let report = scan(&lines(text), &quiet_config());

        let errors: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 0);
        assert!(errors[0].message.starts_with("bad index line"));
        assert_eq!(errors[1].line, 6);
        assert_eq!(errors[1].message, "bad timing line");

        // the record after the garbled one is still accounted
        assert!(report
            .hints
            .iter()
            .any(|h| h.kind == HintKind::Duration && h.line == 10));
    }

    #[test]
    fn non_sequential_index_is_warned() {
        let text = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n5\n00:00:03,000 --> 00:00:04,000\nB\n";
        let report = scan(&lines(text), &quiet_config());
        let warning = report
            .diagnostics
            .iter()
            .find(|d| d.severity == Severity::Warning)
            .unwrap();
        assert_eq!(warning.line, 4);
        assert_eq!(warning.message, "non-sequential index 5, expected 2");
    }

    #[test]
    fn overlap_and_reorder_diagnostics() {
        let overlap = "1\n00:00:01,000 --> 00:00:03,000\nA\n\n2\n00:00:02,000 --> 00:00:04,000\nB\n";
        let report = scan(&lines(overlap), &quiet_config());
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.message.contains("overlaps")));

        let reorder = "1\n00:00:05,000 --> 00:00:06,000\nA\n\n2\n00:00:01,000 --> 00:00:02,000\nB\n";
        let report = scan(&lines(reorder), &quiet_config());
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error && d.message.contains("predecessor")));
    }

    #[test]
    fn short_pause_is_warned() {
        let config = ScanConfig {
            min_pause: 500,
            ..quiet_config()
        };
        let text = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:02,200 --> 00:00:03,000\nB\n";
        let report = scan(&lines(text), &config);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.message.contains("below the minimum")));
    }

    #[test]
    fn unterminated_final_record_is_flagged() {
        let report = scan(&lines("1\n00:00:01,000 --> 00:00:02,000\nA"), &quiet_config());
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.message == "unterminated final subtitle"));
        // its duration hint is still produced
        assert!(report.hints.iter().any(|h| h.kind == HintKind::Duration));
    }

    #[test]
    fn never_panics_on_arbitrary_text() {
        for text in [
            "",
            "\n\n\n",
            "-->",
            "1",
            "1\n",
            "1\n00:00:01,000 --> ",
            "é<\n>\u{1F600}<i\n",
        ] {
            let _ = scan(&lines(text), &ScanConfig::default());
        }
    }
}
