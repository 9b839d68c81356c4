//! Serial console for discrete GPIO control
//!
//! Polled, single loop - no interrupts, no input buffering.
//! Zero heap allocation - one fixed line buffer per command.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod line_editor;
pub mod tokenizer;

pub use commands::{execute, find_command, CommandContext, CommandDescriptor, COMMANDS};
pub use console::{Console, LineOutcome};
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use line_editor::{EditStats, EditorState, LineEditor, ERASE_SEQUENCE};
pub use tokenizer::{parse_line, tokenize, ParsedCommand, TokenizeError};
