//! Log output on a dedicated TX-only UART.
//!
//! The console UART carries only the command protocol, so diagnostics go
//! out on a second UART to an external USB-UART adapter.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 log TX pin ──────▶ USB-UART RX
//!                           └─▶ PC Serial Monitor
//! ```

use core::fmt::Write;

use crate::logging::{BufWriter, LogEntry, LogStream};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// Formatted line size limit.
pub const LOG_LINE_SIZE: usize = 160;

/// Format log entry to string.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = BufWriter::new(buf);
    let _ = writeln!(
        writer,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
    writer.written().len()
}

/// Drain every pending entry of `stream` into `sink`.
///
/// A dropped-entries notice is emitted first if the ring overflowed since
/// the last drain. Returns the number of entries written.
pub fn drain_log<const N: usize>(stream: &LogStream<N>, mut sink: impl FnMut(&[u8])) -> usize {
    let mut line = [0u8; LOG_LINE_SIZE];

    let dropped = stream.take_dropped();
    if dropped > 0 {
        let mut w = BufWriter::new(&mut line);
        let _ = writeln!(w, "[WARN] Dropped: {}", dropped);
        sink(w.written());
    }

    let mut count = 0;
    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut line);
        sink(&line[..len]);
        count += 1;
    }
    count
}

/// Initialize a TX-only UART for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = impl uart::Uart> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    baud_rate: u32,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Drain `stream` to the log UART.
#[cfg(target_os = "espidf")]
pub fn drain_to_uart<const N: usize>(stream: &LogStream<N>, uart: &mut UartTxDriver<'_>) -> usize {
    drain_log(stream, |bytes| {
        let _ = uart.write(bytes);
    })
}
