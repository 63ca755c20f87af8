//! Timecode codec for SubRip duration lines
//!
//! Converts between millisecond counts and the fixed-width
//! `HH:MM:SS,mmm` textual timecode, and between a pair of timecodes and
//! a full `HH:MM:SS,mmm --> HH:MM:SS,mmm` duration line. The strict
//! duration-line parser is all-or-nothing: any deviation from the fixed
//! pattern (missing leading zeros, stray whitespace, wrong separator)
//! fails as a whole.
//!
//! The start/end columns of a duration line are exposed as named field
//! spans rather than magic offsets, so endpoint splicing and caret
//! guards cannot silently drift from the format.

use core::ops::{Range, RangeInclusive};

/// Milliseconds. Signed so shift deltas and prompt input can be negative;
/// validation against negative times happens at the operation level.
pub type TimeMs = i64;

/// Byte length of a strict duration line.
pub const DURATION_LINE_LEN: usize = 29;

/// Byte span of the start timecode within a duration line.
pub const START_FIELD: Range<usize> = 0..12;

/// Byte span of the end timecode within a duration line.
pub const END_FIELD: Range<usize> = 17..29;

/// Caret columns considered "on the start timecode" for endpoint edits.
pub const START_CARET_SPAN: RangeInclusive<usize> = 0..=12;

/// Caret columns considered "on the end timecode" for endpoint edits.
pub const END_CARET_SPAN: RangeInclusive<usize> = 16..=28;

const ARROW: &[u8] = b" --> ";

/// Combine clock components into a millisecond count.
///
/// No range validation is applied: components come from digit-constrained
/// captures, so out-of-range values can only make the result larger.
#[must_use]
pub const fn to_ms(h: i64, m: i64, s: i64, millis: i64) -> TimeMs {
    millis + s * 1000 + m * 60_000 + h * 3_600_000
}

/// Split a non-negative millisecond count into clock components.
///
/// All components are non-negative when `ms >= 0`. Negative values are
/// formatted elsewhere with an explicit sign prefix rather than negative
/// components.
#[must_use]
pub const fn from_ms(ms: TimeMs) -> (i64, i64, i64, i64) {
    let h = ms / 3_600_000;
    let ms = ms - h * 3_600_000;
    let m = ms / 60_000;
    let ms = ms - m * 60_000;
    let s = ms / 1000;
    (h, m, s, ms - s * 1000)
}

/// Format a millisecond count as `HH:MM:SS,mmm`.
///
/// Hours, minutes and seconds are zero-padded to width 2, milliseconds
/// to width 3. Negative input gets a leading `-`.
///
/// ```rust
/// use srt_core::time::format_timecode;
/// assert_eq!(format_timecode(3_661_002), "01:01:01,002");
/// assert_eq!(format_timecode(-500), "-00:00:00,500");
/// ```
#[must_use]
pub fn format_timecode(ms: TimeMs) -> String {
    if ms < 0 {
        return format!("-{}", format_timecode(-ms));
    }
    let (h, m, s, millis) = from_ms(ms);
    format!("{h:02}:{m:02}:{s:02},{millis:03}")
}

/// Format a full `HH:MM:SS,mmm --> HH:MM:SS,mmm` duration line.
#[must_use]
pub fn duration_line(start: TimeMs, end: TimeMs) -> String {
    format!("{} --> {}", format_timecode(start), format_timecode(end))
}

/// Format a signed pause/offset as `±S.mmm` seconds.
#[must_use]
pub fn format_signed_seconds(ms: TimeMs) -> String {
    let sign = if ms < 0 { '-' } else { '+' };
    let abs = ms.abs();
    format!("{sign}{}.{:03}", abs / 1000, abs % 1000)
}

/// Format an unsigned duration as `S.mmm` seconds.
#[must_use]
pub fn format_seconds(ms: TimeMs) -> String {
    let abs = ms.abs();
    format!("{}.{:03}", abs / 1000, abs % 1000)
}

const fn digit(b: u8) -> Option<i64> {
    if b.is_ascii_digit() {
        Some((b - b'0') as i64)
    } else {
        None
    }
}

/// Parse exactly `DD:DD:DD,DDD` from a 12-byte slice.
fn timecode_from_bytes(b: &[u8]) -> Option<TimeMs> {
    if b.len() != 12 || b[2] != b':' || b[5] != b':' || b[8] != b',' {
        return None;
    }
    let h = digit(b[0])? * 10 + digit(b[1])?;
    let m = digit(b[3])? * 10 + digit(b[4])?;
    let s = digit(b[6])? * 10 + digit(b[7])?;
    let millis = digit(b[9])? * 100 + digit(b[10])? * 10 + digit(b[11])?;
    Some(to_ms(h, m, s, millis))
}

/// Strictly parse a `HH:MM:SS,mmm --> HH:MM:SS,mmm` duration line.
///
/// Returns both endpoints or `None`; never a partial result. Two-digit
/// hour/minute/second fields and a three-digit millisecond field are
/// required on each side.
///
/// ```rust
/// use srt_core::time::parse_duration_line;
/// assert_eq!(
///     parse_duration_line("00:00:01,000 --> 00:00:02,000"),
///     Some((1000, 2000))
/// );
/// assert_eq!(parse_duration_line("0:00:01,000 --> 00:00:02,000"), None);
/// ```
#[must_use]
pub fn parse_duration_line(line: &str) -> Option<(TimeMs, TimeMs)> {
    let b = line.as_bytes();
    if b.len() != DURATION_LINE_LEN || &b[START_FIELD.end..END_FIELD.start] != ARROW {
        return None;
    }
    let start = timecode_from_bytes(&b[START_FIELD])?;
    let end = timecode_from_bytes(&b[END_FIELD])?;
    Some((start, end))
}

/// Leniently parse a time entered at a prompt.
///
/// Accepts an optional leading `+`/`-` sign followed by one of: a bare
/// integer (milliseconds), `H:MM:SS,mmm`, `MM:SS,mmm`, `SS,mmm`,
/// `H:MM:SS` or `MM:SS`. Component widths are not enforced, unlike the
/// strict duration-line parser; components whose combined value would
/// not fit in [`TimeMs`] return `None` instead.
#[must_use]
pub fn parse_flexible(text: &str) -> Option<TimeMs> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'-' => (-1, &text[1..]),
        b'+' => (1, &text[1..]),
        _ => (1, text),
    };
    if rest.is_empty() {
        return None;
    }

    let (clock, millis_text) = match rest.split_once(',') {
        Some((clock, millis)) => (clock, Some(millis)),
        None => (rest, None),
    };
    let millis = match millis_text {
        Some(m) if is_digits(m) => m.parse::<i64>().ok()?,
        Some(_) => return None,
        None => 0,
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.iter().any(|p| !is_digits(p)) {
        return None;
    }
    let part = |i: usize| parts[i].parse::<i64>().ok();

    let value = match (parts.len(), millis_text.is_some()) {
        // Bare integer: already milliseconds.
        (1, false) => part(0)?,
        (1, true) => to_ms_checked(0, 0, part(0)?, millis)?,
        (2, _) => to_ms_checked(0, part(0)?, part(1)?, millis)?,
        (3, _) => to_ms_checked(part(0)?, part(1)?, part(2)?, millis)?,
        _ => return None,
    };
    Some(sign * value)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Checked variant of [`to_ms`] for prompt input, where component
/// magnitudes are unbounded.
fn to_ms_checked(h: i64, m: i64, s: i64, millis: i64) -> Option<TimeMs> {
    h.checked_mul(3_600_000)?
        .checked_add(m.checked_mul(60_000)?)?
        .checked_add(s.checked_mul(1000)?)?
        .checked_add(millis)
}

/// Splice a new start timecode into a duration line.
///
/// Positional column edit, not a rebuild: everything outside the start
/// field is preserved byte for byte. Returns `None` if `line` is not a
/// strict duration line.
#[must_use]
pub fn amend_start(line: &str, ms: TimeMs) -> Option<String> {
    parse_duration_line(line)?;
    Some(format!(
        "{}{}",
        format_timecode(ms),
        &line[START_FIELD.end..]
    ))
}

/// Splice a new end timecode into a duration line.
///
/// Counterpart of [`amend_start`] for the end field.
#[must_use]
pub fn amend_end(line: &str, ms: TimeMs) -> Option<String> {
    parse_duration_line(line)?;
    Some(format!("{}{}", &line[..END_FIELD.start], format_timecode(ms)))
}
