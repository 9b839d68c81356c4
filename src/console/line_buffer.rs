//! Line buffer for console input
//!
//! Fixed capacity, last [`LINE_RESERVE`] slots kept for the LF/CR pair.
//! Two cursors walk the buffer: `put` (next byte to store) and `get`
//! (next byte to echo). `get <= put` always holds.

use crate::config::{LINE_CAPACITY, LINE_RESERVE};

/// Line input buffer with echo cursor
pub struct LineBuffer<const N: usize = LINE_CAPACITY> {
    buf: [u8; N],
    put: usize,
    get: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Highest `put` index ordinary characters may reach.
    pub const WRITABLE: usize = N - LINE_RESERVE;

    /// Create empty buffer
    pub const fn new() -> Self {
        assert!(N > LINE_RESERVE, "Line buffer must be larger than the terminator reserve");

        Self {
            buf: [0u8; N],
            put: 0,
            get: 0,
        }
    }

    /// Store a character. Returns false (and stores nothing) when full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.put < Self::WRITABLE {
            self.buf[self.put] = c;
            self.put += 1;
            true
        } else {
            false
        }
    }

    /// Store the LF/CR pair into the reserve and return its start index.
    pub fn push_line_end(&mut self) -> usize {
        let eol = self.put;
        self.buf[eol] = b'\n';
        self.buf[eol + 1] = b'\r';
        self.put += 2;
        eol
    }

    /// Remove the last character if it has already been echoed.
    ///
    /// Returns false when there is nothing to remove or echo is behind.
    pub fn retract(&mut self) -> bool {
        if self.put > 0 && self.put == self.get {
            self.put -= 1;
            self.get -= 1;
            true
        } else {
            false
        }
    }

    /// Next byte waiting to be echoed, advancing the echo cursor.
    pub fn take_echo(&mut self) -> Option<u8> {
        if self.get < self.put {
            let c = self.buf[self.get];
            self.get += 1;
            Some(c)
        } else {
            None
        }
    }

    /// True when every stored byte has been echoed.
    pub fn echo_done(&self) -> bool {
        self.put == self.get
    }

    /// Overwrite `eol` with a NUL terminator.
    pub fn terminate(&mut self, eol: usize) {
        self.buf[eol] = 0;
    }

    /// Bytes stored so far, including any line end.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.put]
    }

    /// Bytes before `eol`.
    pub fn line(&self, eol: usize) -> &[u8] {
        &self.buf[..eol]
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.put
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.put == 0
    }

    /// Number of stored bytes not yet echoed.
    pub fn pending_echo(&self) -> usize {
        self.put - self.get
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
