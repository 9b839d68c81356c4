//! Polled line editor.
//!
//! Reads one command line from a [`ByteTransport`] while echoing it,
//! without an input buffer, interrupts or blocking. Every poll does at most
//! one receive and at most one transmit:
//!
//! ```text
//!            recv \b (echo caught up)           3 erase bytes sent
//! Accepting ───────────────────────────▶ Erasing ──────────────────▶ Accepting
//!     │
//!     │ recv \r or \n                   all echoed + tx ready
//!     └──────────────────▶ Terminating ───────────────────────▶ Complete
//! ```
//!
//! Only `Accepting` polls the receiver. Echo of stored bytes runs in
//! `Accepting` and `Terminating` whenever the transmitter is ready.
//! An erase always finishes before any later echo byte.
//!
//! Characters past capacity are dropped and backspaces with nothing
//! echoed to erase are ignored. Neither is signalled on the wire; both are
//! counted in [`EditStats`].

use super::line_buffer::LineBuffer;
use crate::config::LINE_CAPACITY;
use crate::transport::ByteTransport;

/// Bytes sent to visually delete one character: left, blank, left.
pub const ERASE_SEQUENCE: [u8; 3] = [0x08, b' ', 0x08];

/// Editor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Receiving input, echoing when possible
    Accepting,
    /// Emitting `ERASE_SEQUENCE[step]`, receive suspended
    Erasing { step: u8 },
    /// Line end received at `eol`, draining remaining echo
    Terminating { eol: usize },
    /// Line finished, buffer terminated at `eol`
    Complete { eol: usize },
}

/// Counters for silently absorbed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditStats {
    /// Characters dropped because the buffer was full
    pub dropped: u32,
    /// Backspaces ignored (nothing echoed to erase)
    pub ignored_backspaces: u32,
}

/// One line read in progress. Create a fresh editor per line.
pub struct LineEditor<const N: usize = LINE_CAPACITY> {
    line: LineBuffer<N>,
    state: EditorState,
    stats: EditStats,
}

impl<const N: usize> LineEditor<N> {
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            state: EditorState::Accepting,
            stats: EditStats { dropped: 0, ignored_backspaces: 0 },
        }
    }

    /// Spin until a full line has been received and echoed.
    ///
    /// Blocks the caller indefinitely; there is no timeout.
    pub fn read_line<T: ByteTransport + ?Sized>(&mut self, transport: &mut T) -> &[u8] {
        while !self.poll(transport) {
            core::hint::spin_loop();
        }
        self.line().unwrap_or(&[])
    }

    /// Run one iteration of the editor. Returns true once the line is complete.
    pub fn poll<T: ByteTransport + ?Sized>(&mut self, transport: &mut T) -> bool {
        if self.state == EditorState::Accepting {
            if let Some(byte) = transport.try_receive() {
                self.accept(byte);
            }
        }

        if !transport.transmit_ready() {
            return self.is_complete();
        }

        match self.state {
            EditorState::Erasing { step } => {
                transport.transmit_one(ERASE_SEQUENCE[step as usize]);
                let next = step + 1;
                self.state = if next as usize >= ERASE_SEQUENCE.len() {
                    EditorState::Accepting
                } else {
                    EditorState::Erasing { step: next }
                };
            }
            EditorState::Complete { .. } => {}
            _ => {
                if let Some(byte) = self.line.take_echo() {
                    transport.transmit_one(byte);
                } else if let EditorState::Terminating { eol } = self.state {
                    self.line.terminate(eol);
                    self.state = EditorState::Complete { eol };
                }
            }
        }

        self.is_complete()
    }

    fn accept(&mut self, byte: u8) {
        match byte {
            b'\n' | b'\r' => {
                let eol = self.line.push_line_end();
                self.state = EditorState::Terminating { eol };
            }
            0x08 | 0x7F => {
                if self.line.retract() {
                    self.state = EditorState::Erasing { step: 0 };
                } else {
                    self.stats.ignored_backspaces += 1;
                }
            }
            _ => {
                if !self.line.push(byte) {
                    self.stats.dropped += 1;
                }
            }
        }
    }

    /// The completed line without terminator, or None while still editing.
    pub fn line(&self) -> Option<&[u8]> {
        match self.state {
            EditorState::Complete { eol } => Some(self.line.line(eol)),
            _ => None,
        }
    }

    /// Raw buffer contents so far.
    pub fn buffer(&self) -> &LineBuffer<N> {
        &self.line
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn stats(&self) -> EditStats {
        self.stats
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, EditorState::Complete { .. })
    }
}

impl<const N: usize> Default for LineEditor<N> {
    fn default() -> Self {
        Self::new()
    }
}
