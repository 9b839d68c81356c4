//! Module: config
//!
//! Purpose: Build-time configuration for GpioConsole.
//!
//! Architecture:
//! - Console limits: line capacity, terminator reserve, token count
//! - Board port table: selected by cargo feature (`esp32s3`, `esp32p4`)
//! - Version strings: injected by build.rs
//!
//! Nothing here is persisted or changed at runtime.

pub mod ports;

pub use ports::{PortInfo, PortTable, BOARD_PORTS};

/// Line buffer capacity in bytes, including the terminator reserve.
pub const LINE_CAPACITY: usize = 80;

/// Slots at the end of the line buffer kept free for the LF/CR pair.
pub const LINE_RESERVE: usize = 2;

/// Maximum number of tokens on one command line.
pub const MAX_ARGC: usize = 8;

/// Highest pin number accepted within a port.
pub const PIN_NUM_MAX: u32 = 15;

/// Console UART baud rate.
pub const CONSOLE_BAUD: u32 = 115_200;

/// Debug log UART baud rate.
pub const LOG_BAUD: u32 = 115_200;

/// Prompt printed before each line read.
pub const PROMPT: &str = "> ";

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Build timestamp (set by build.rs)
pub const BUILD_TIME: &str = env!("BUILD_TIME");
