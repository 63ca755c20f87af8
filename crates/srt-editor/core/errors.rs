//! Error types for the srt-editor crate
//!
//! Wraps `ParseError` from srt-core and adds editor-specific error
//! cases. Same philosophy as the core: thiserror for structured errors,
//! detailed context, no partial mutation behind a failure.

use core::fmt;
use srt_core::ParseError;
use thiserror::Error;

/// Main error type for editor operations.
///
/// Parse errors abort a command before it starts; command failures are
/// the all-or-nothing refusals of the structural editors (would create
/// negative time, would violate a minimum, odd-numbered split, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A document failed to parse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The concatenated document failed to parse even though both halves
    /// parsed individually
    #[error("error appears after successful import: {0}")]
    ImportReparse(ParseError),

    /// The caret is not inside a subtitle record
    #[error("not in a subtitle")]
    NotInSubtitle,

    /// The operation requires the caret on a duration line
    #[error("not on a duration line")]
    NotOnDurationLine,

    /// A structural editor refused to apply a corrupting edit
    #[error("{message}")]
    CommandFailed { message: String },
}

impl EditorError {
    /// Create a command failure with a human-readable message.
    pub fn command_failed<T: fmt::Display>(message: T) -> Self {
        Self::CommandFailed {
            message: message.to_string(),
        }
    }

    /// Get the underlying parse error if this wraps one.
    #[must_use]
    pub const fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) | Self::ImportReparse(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for editor operations.
pub type Result<T> = core::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use srt_core::{ParseError, ParseErrorKind};

    #[test]
    fn conversion_from_parse_error() {
        let parse = ParseError::new(ParseErrorKind::BadIndexLine, 3);
        let err: EditorError = parse.into();
        assert_eq!(err.as_parse_error(), Some(&parse));
        assert_eq!(err.to_string(), "bad index line at line 3");
    }

    #[test]
    fn import_reparse_display() {
        let parse = ParseError::new(ParseErrorKind::BadTimingLine, 9);
        let err = EditorError::ImportReparse(parse);
        assert_eq!(
            err.to_string(),
            "error appears after successful import: bad timing line at line 9"
        );
    }

    #[test]
    fn command_failure_display() {
        let err = EditorError::command_failed("can't merge the last subtitle");
        assert_eq!(err.to_string(), "can't merge the last subtitle");
        assert_eq!(err.as_parse_error(), None);
    }
}
