//! Line-oriented SubRip document parser and subtitle locator
//!
//! A single forward pass over the line list drives a three-state machine
//! (`Index` → `Timing` → `Subtitle`) and recovers an ordered sequence of
//! [`Subtitle`] records, or fails with a structured [`ParseError`]
//! pinpointing the offending line.
//!
//! The parser is strict about syntax but deliberately does not enforce
//! semantic invariants: indices may be out of sequence and intervals may
//! be inverted or overlapping. Those are repaired by the structural
//! editors or reported by the annotation scanner. Parsing never mutates
//! the input line list.

use crate::errors::{ParseError, ParseErrorKind};
use crate::time::{parse_duration_line, TimeMs};
use core::cmp::Ordering;

/// One parsed caption block: index line, duration line, text lines and
/// the trailing blank separator.
///
/// `line_pos` anchors all other lines: `line_pos + 1` is the duration
/// line, `line_pos + 2 ..` the text lines, and the line after those the
/// blank separator. The record is a derived value; the text lines stay
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subtitle {
    /// Zero-based line number of the index line in the source line list
    pub line_pos: usize,
    /// Displayed sequence number as found in the text; not guaranteed
    /// contiguous or correct until a fix/sort operation runs
    pub index: i64,
    /// Display interval start in milliseconds
    pub start_ms: TimeMs,
    /// Display interval end in milliseconds; `start_ms <= end_ms` is not
    /// enforced here
    pub end_ms: TimeMs,
    /// Derived `end_ms - start_ms`
    pub duration_ms: TimeMs,
    /// Tag-stripped character count of each text line, in order. Empty
    /// text lines are recorded as length 0 and still count as a line.
    pub line_lengths: Vec<usize>,
}

impl Subtitle {
    /// Line number of the duration line.
    #[must_use]
    pub const fn timing_line(&self) -> usize {
        self.line_pos + 1
    }

    /// Line number of the first text line.
    #[must_use]
    pub const fn text_start(&self) -> usize {
        self.line_pos + 2
    }

    /// Line number one past the last text line (the blank separator).
    #[must_use]
    pub fn text_end(&self) -> usize {
        self.line_pos + 2 + self.line_lengths.len()
    }

    /// Last line belonging to this record, inclusive of the trailing
    /// blank separator position.
    #[must_use]
    pub fn span_end(&self) -> usize {
        self.text_end()
    }

    /// Whether `line` falls inside this record's span.
    #[must_use]
    pub fn contains_line(&self, line: usize) -> bool {
        (self.line_pos..=self.span_end()).contains(&line)
    }

    /// Total tag-stripped character count across all text lines.
    #[must_use]
    pub fn total_chars(&self) -> usize {
        self.line_lengths.iter().sum()
    }
}

/// Parser state: which line category comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Index,
    Timing,
    Subtitle,
}

/// Character count of a text line after stripping inline markup tags.
///
/// `<...>` spans are removed non-greedily with no nesting support; an
/// unclosed `<` is kept as literal text.
#[must_use]
pub fn stripped_len(line: &str) -> usize {
    let mut count = 0;
    let mut rest = line;
    loop {
        let Some(open) = rest.find('<') else {
            count += rest.chars().count();
            break;
        };
        count += rest[..open].chars().count();
        match rest[open + 1..].find('>') {
            Some(close) => rest = &rest[open + 1 + close + 1..],
            None => {
                // Unclosed tag: keep the remainder as literal text.
                count += rest[open..].chars().count();
                break;
            }
        }
    }
    count
}

/// Parse a full line list into an ordered sequence of subtitle records.
///
/// # Errors
///
/// Fails with [`ParseErrorKind::BadIndexLine`] when a non-blank line in
/// index position is not pure digits, and with
/// [`ParseErrorKind::BadTimingLine`] when the line after an index line
/// is not a strict duration line. Blank lines in index position are
/// skipped only once at least one record has been parsed.
///
/// End of input while reading text lines pushes the trailing record even
/// without its closing blank line; the annotation scanner is the layer
/// that reports an unterminated final record. End of input right after
/// an index line drops the unfinished record; use
/// [`parse_subtitles_with_tail`] when that condition matters.
pub fn parse_subtitles(lines: &[String]) -> Result<Vec<Subtitle>, ParseError> {
    parse_subtitles_with_tail(lines).map(|(subs, _)| subs)
}

/// Like [`parse_subtitles`], but also reports an orphan trailing index
/// line.
///
/// The second element is the line number of a final index line whose
/// duration line never arrived (input ended while a timing line was
/// expected). The orphan is neither a record nor an error; callers that
/// check file termination inspect it.
///
/// # Errors
///
/// Same failure modes as [`parse_subtitles`].
pub fn parse_subtitles_with_tail(
    lines: &[String],
) -> Result<(Vec<Subtitle>, Option<usize>), ParseError> {
    let mut subs = Vec::new();
    let mut state = State::Index;
    let mut current: Option<Subtitle> = None;

    for (i, line) in lines.iter().enumerate() {
        match state {
            State::Index => {
                if line.is_empty() {
                    if subs.is_empty() {
                        return Err(ParseError::new(ParseErrorKind::BadIndexLine, i));
                    }
                    continue;
                }
                let index = parse_index_line(line)
                    .ok_or(ParseError::new(ParseErrorKind::BadIndexLine, i))?;
                current = Some(Subtitle {
                    line_pos: i,
                    index,
                    start_ms: 0,
                    end_ms: 0,
                    duration_ms: 0,
                    line_lengths: Vec::new(),
                });
                state = State::Timing;
            }
            State::Timing => {
                let (start, end) = parse_duration_line(line)
                    .ok_or(ParseError::new(ParseErrorKind::BadTimingLine, i))?;
                if let Some(sub) = current.as_mut() {
                    sub.start_ms = start;
                    sub.end_ms = end;
                    sub.duration_ms = end - start;
                }
                state = State::Subtitle;
            }
            State::Subtitle => {
                if line.is_empty() {
                    if let Some(sub) = current.take() {
                        subs.push(sub);
                    }
                    state = State::Index;
                } else if let Some(sub) = current.as_mut() {
                    sub.line_lengths.push(stripped_len(line));
                }
            }
        }
    }

    // Lenient EOF: a final record without its closing blank still counts.
    if state == State::Subtitle {
        if let Some(sub) = current.take() {
            subs.push(sub);
        }
    }

    let orphan = if state == State::Timing {
        current.map(|sub| sub.line_pos)
    } else {
        None
    };

    Ok((subs, orphan))
}

pub(crate) fn parse_index_line(line: &str) -> Option<i64> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Any all-digit line is a syntactic match; an index too large for
    // i64 clamps rather than failing the whole document.
    Some(line.parse().unwrap_or(i64::MAX))
}

/// Binary-search the record containing `line`.
///
/// The records are ordered by `line_pos` because they are appended in
/// file order. Returns `None` when `line` falls in an inter-record gap
/// (possible with extra blank lines) or beyond the last record.
#[must_use]
pub fn find_subtitle(subs: &[Subtitle], line: usize) -> Option<usize> {
    subs.binary_search_by(|sub| {
        if line < sub.line_pos {
            Ordering::Greater
        } else if line > sub.span_end() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
    .ok()
}
