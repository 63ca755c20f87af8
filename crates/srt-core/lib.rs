//! # srt-core
//!
//! Host-independent document model for SubRip (`.srt`) subtitle files:
//! a line-oriented parser that recovers structured subtitle records from
//! raw text, a fixed-width timecode codec, a binary-search subtitle
//! locator, and a lenient annotation scanner for live editor hints and
//! diagnostics.
//!
//! The crate operates purely on an ordered list of text lines (CRLF
//! already normalized to LF by the host) and never performs I/O. Text
//! lines are authoritative; parsed records are derived fresh per call
//! and discarded after use.
//!
//! ## Quick Start
//!
//! ```rust
//! use srt_core::parser::{parse_subtitles, find_subtitle};
//!
//! let lines: Vec<String> = "1\n00:00:01,000 --> 00:00:03,000\nHello\n"
//!     .split('\n')
//!     .map(str::to_string)
//!     .collect();
//!
//! let subs = parse_subtitles(&lines)?;
//! assert_eq!(subs.len(), 1);
//! assert_eq!(subs[0].start_ms, 1000);
//! assert_eq!(find_subtitle(&subs, 2), Some(0));
//! # Ok::<(), srt_core::ParseError>(())
//! ```

#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod errors;
pub mod parser;
pub mod time;

pub use analysis::{scan, Diagnostic, Hint, HintKind, ScanConfig, ScanReport, Severity};
pub use errors::{ParseError, ParseErrorKind};
pub use parser::{find_subtitle, parse_subtitles, parse_subtitles_with_tail, Subtitle};
pub use time::TimeMs;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations.
pub type Result<T> = core::result::Result<T, ParseError>;
