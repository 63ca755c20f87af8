//! Editor core: errors and host-collaborator interfaces

pub mod context;
pub mod errors;

pub use context::{Caret, EditorSurface, LineEdit, PromptSource};
pub use errors::{EditorError, Result};
