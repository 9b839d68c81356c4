//! Main console struct integrating all components

use core::fmt::Write;

use super::{execute, parse_line, CommandContext, ConsoleError, LineEditor};
use crate::config::{PortTable, LINE_CAPACITY, PROMPT};
use crate::hal::{DiscreteIo, GpioError, System};
use crate::logging::LogStream;
use crate::transport::{ByteTransport, TransportWriter};
use crate::{log_debug, log_error, log_info, log_warn};

/// Outcome of one prompt/read/dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line, nothing dispatched
    Empty,
    /// Command ran to completion
    Done,
    /// Tokenizer or command failed; the message was printed
    Failed(ConsoleError),
}

/// Serial command console
pub struct Console<'a, T, P, S> {
    transport: T,
    pins: P,
    system: S,
    ports: &'a PortTable,
    log: &'a LogStream,
}

impl<'a, T, P, S> Console<'a, T, P, S>
where
    T: ByteTransport,
    P: DiscreteIo,
    S: System,
{
    /// Create new console
    pub fn new(transport: T, pins: P, system: S, ports: &'a PortTable, log: &'a LogStream) -> Self {
        Self { transport, pins, system, ports, log }
    }

    /// Print startup banner
    pub fn print_banner(&mut self) {
        let _ = write!(TransportWriter::new(&mut self.transport), "\nStarting\n");
        log_info!(self.log, self.system.uptime_us(), "console started");
    }

    /// Prompt, read one line, and dispatch it.
    ///
    /// Blocks until a full line has been entered.
    pub fn run_once(&mut self) -> LineOutcome {
        let _ = write!(TransportWriter::new(&mut self.transport), "{}", PROMPT);

        let mut editor = LineEditor::<LINE_CAPACITY>::new();
        editor.read_line(&mut self.transport);
        let stats = editor.stats();
        let line = editor.line().unwrap_or(&[]);
        let now = self.system.uptime_us();

        if stats.dropped > 0 {
            log_warn!(self.log, now, "line full, dropped {} chars", stats.dropped);
        }
        if stats.ignored_backspaces > 0 {
            log_debug!(self.log, now, "ignored {} backspaces", stats.ignored_backspaces);
        }
        log_debug!(self.log, now, "line complete, {} bytes", line.len());

        let mut out = TransportWriter::new(&mut self.transport);

        let cmd = match parse_line(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                let e = ConsoleError::from(e);
                let _ = writeln!(out, "{}", e);
                log_warn!(self.log, now, "{}", e.message());
                return LineOutcome::Failed(e);
            }
        };

        if cmd.is_empty() {
            return LineOutcome::Empty;
        }

        let mut ctx = CommandContext {
            pins: &mut self.pins,
            system: &mut self.system,
            ports: self.ports,
        };

        match execute(&cmd, &mut ctx, &mut out) {
            Ok(()) => LineOutcome::Done,
            Err(e) => {
                let _ = writeln!(out, "{}", e);
                let name = core::str::from_utf8(cmd.command().unwrap_or(&[])).unwrap_or("?");
                match e {
                    ConsoleError::Gpio(GpioError::Driver(code)) => {
                        log_error!(self.log, now, "{}: gpio driver error {}", name, code);
                    }
                    _ => log_warn!(self.log, now, "{}: {}", name, e.message()),
                }
                LineOutcome::Failed(e)
            }
        }
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
