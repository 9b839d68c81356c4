//! Byte transport for the console serial link.
//!
//! The console never blocks on receive and never buffers beyond one line.
//! Everything it needs from the UART is three polled primitives.
//!
//! # Transmit quirk
//!
//! `transmit_one` returns nothing. Some UART drivers report a zero-timeout
//! write as failed even when the byte went out, so the console treats a
//! `true` from `transmit_ready` immediately before the write as proof that
//! the byte was sent.

use core::fmt::Write;

/// Non-blocking byte-level serial transport.
pub trait ByteTransport {
    /// Take one received byte if one is available. Never blocks.
    fn try_receive(&mut self) -> Option<u8>;

    /// True if one byte can be written without blocking.
    fn transmit_ready(&mut self) -> bool;

    /// Write exactly one byte. Only called right after `transmit_ready()`
    /// returned true.
    fn transmit_one(&mut self, byte: u8);
}

/// Blocking text writer over a [`ByteTransport`].
///
/// Used for prompts and command responses, never for echo. Each `\n` is
/// followed by `\r` so terminals return to column 0.
pub struct TransportWriter<'a, T: ByteTransport + ?Sized> {
    transport: &'a mut T,
}

impl<'a, T: ByteTransport + ?Sized> TransportWriter<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        Self { transport }
    }

    /// Spin until the transport is ready, then send one byte.
    fn put(&mut self, byte: u8) {
        while !self.transport.transmit_ready() {
            core::hint::spin_loop();
        }
        self.transport.transmit_one(byte);
    }
}

impl<T: ByteTransport + ?Sized> Write for TransportWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            self.put(byte);
            if byte == b'\n' {
                self.put(b'\r');
            }
        }
        Ok(())
    }
}
