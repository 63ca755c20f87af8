//! Structural editor layer for SubRip subtitles
//!
//! `srt-editor` builds the interactive editing operations on top of
//! `srt-core`: merging, splitting, sorting, shifting, timing repair,
//! imports and caret-addressed timecode edits, all expressed as pure
//! [`commands::SubtitleCommand`] values plus an [`session::EditorSession`]
//! that drives them against a host buffer.
//!
//! Hosts implement two small traits: [`EditorSurface`] for buffer access
//! and [`PromptSource`] for the questions some operations need answered
//! mid-flight. Everything else is deterministic and testable in memory.
//!
//! # Example
//!
//! ```
//! use srt_editor::commands::{MergeCommand, Outcome, SubtitleCommand};
//! use srt_core::parse_subtitles;
//!
//! let lines: Vec<String> = "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:04,000 --> 00:00:06,000\nWorld\n"
//!     .split('\n')
//!     .map(str::to_string)
//!     .collect();
//! let subs = parse_subtitles(&lines)?;
//!
//! let result = MergeCommand::pair(0).apply(&lines, &subs)?;
//! let Outcome::Replaced(merged) = result.outcome else {
//!     unreachable!();
//! };
//! assert_eq!(merged[1], "00:00:01,000 --> 00:00:06,000");
//! # Ok::<(), srt_editor::EditorError>(())
//! ```

pub mod commands;
pub mod config;
pub mod core;
pub mod session;

// Re-export srt-core types as first-class citizens
pub use srt_core::time::TimeMs;
pub use srt_core::{find_subtitle, parse_subtitles, ParseError, ParseErrorKind, Subtitle};

pub use commands::{CommandResult, Outcome, SubtitleCommand};
pub use config::{EditorConfig, SplitMode};
pub use core::{Caret, EditorError, EditorSurface, LineEdit, PromptSource, Result};
pub use session::{EditorSession, SessionOutcome};
