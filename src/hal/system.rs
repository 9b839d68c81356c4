//! System services: reset and uptime.

/// Chip-level services used by the console.
pub trait System {
    /// Reset the MCU. On hardware this does not return.
    fn reset(&mut self);

    /// Microseconds since boot, used for log timestamps.
    fn uptime_us(&self) -> i64;
}
