//! Non-blocking diagnostics log for GpioConsole.
//!
//! ```text
//! Console loop           LogStream            Log drain
//! ────────────           ─────────            ─────────
//!
//! log_warn!() ────────▶ [L0][L1][L2] ──────▶ debug UART / stderr
//! never blocks           fixed ring           between lines
//! ```
//!
//! The console link carries only the line protocol. Everything the editor
//! absorbs silently (dropped characters, ignored backspaces) and every
//! dispatch error is recorded here instead.
//!
//! Pushing never blocks: when the ring is full the entry is dropped and
//! counted.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds since boot.
    pub timestamp_us: i64,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, or a placeholder if truncation split a UTF-8 sequence.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fixed-size log ring (single producer, single consumer).
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: One producer writes slots ahead of write_idx, one consumer reads
// slots behind it. Index publication uses Release/Acquire.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry. Never blocks.
    ///
    /// Returns `false` if the ring was full and the entry was dropped.
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: Slot idx is not visible to the consumer until write_idx moves.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Take the oldest entry, or `None` if empty.
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: Single consumer, slot published by the producer
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Read and clear the dropped counter.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    /// Get number of entries waiting to be drained.
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating when it does not fit.
///
/// Returns the number of bytes written.
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Truncating `fmt::Write` over a byte slice.
pub struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl core::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Log with explicit level.
///
/// # Example
///
/// ```ignore
/// console_log!(LogLevel::Info, CONSOLE_LOG_STREAM, now_us, "line {} bytes", len);
/// ```
#[macro_export]
macro_rules! console_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::console_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::console_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::console_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::console_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
