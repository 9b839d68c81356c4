//! Global log stream instance.

use crate::logging::LogStream;

/// Console diagnostics stream.
///
/// Single producer (console loop), single consumer (log drain).
pub static CONSOLE_LOG_STREAM: LogStream = LogStream::new();
