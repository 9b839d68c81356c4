//! # GpioConsole
//!
//! Serial command console for discrete GPIO configuration, read and write.
//!
//! ## Architecture
//!
//! One polling loop, no interrupts, no input buffer:
//!
//! ```text
//! UART bytes ─▶ LineEditor ─▶ tokenize ─▶ execute ─▶ response text
//!     ▲            │ echo / erase                        │
//!     └────────────┴─────────────────────────────────────┘
//! ```
//!
//! - [`transport::ByteTransport`] is the only view of the serial link
//! - [`console::LineEditor`] multiplexes receive and echo one byte at a time
//! - Pins and reset sit behind [`hal::DiscreteIo`] and [`hal::System`]

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod transport;
pub mod uart_logger;

pub use config::{PortTable, BOARD_PORTS};
pub use console::{Console, LineEditor, LineOutcome};
pub use log_globals::CONSOLE_LOG_STREAM;
pub use transport::{ByteTransport, TransportWriter};
