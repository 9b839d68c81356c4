//! GpioConsole - Main entry point
//!
//! On ESP-IDF:
//! 1. Install the console UART and the TX-only log UART
//! 2. Print the banner
//! 3. Read, dispatch and answer command lines forever, draining the
//!    diagnostics log between lines
//!
//! On the host the same console runs over stdin/stdout with simulated
//! pins. Put the terminal in raw mode (or drive it from a pty) to see the
//! console's own echo instead of the terminal's.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::gpio::AnyIOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{config::Config, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys as esp_idf_sys;

    use gpio_console::hal::{EspPins, EspSystem, EspUartTransport};
    use gpio_console::{config, uart_logger, Console, BOARD_PORTS, CONSOLE_LOG_STREAM};

    #[no_mangle]
    fn main() {
        // Initialize ESP-IDF
        esp_idf_sys::link_patches();

        // Nothing to report to without a UART; restart and try again
        if run().is_err() {
            // SAFETY: esp_restart takes no arguments and does not return
            unsafe {
                esp_idf_sys::esp_restart();
            }
        }
    }

    fn run() -> Result<(), esp_idf_sys::EspError> {
        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;
        let uart_config = Config::default().baudrate(Hertz(config::CONSOLE_BAUD));

        // UART0 on the USB-UART bridge pins, log TX on a free GPIO
        #[cfg(not(feature = "esp32p4"))]
        let (console_uart, mut log_uart) = (
            UartDriver::new(
                peripherals.uart0,
                pins.gpio43,
                pins.gpio44,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &uart_config,
            )?,
            uart_logger::init_uart_logger(peripherals.uart1, pins.gpio6, config::LOG_BAUD)?,
        );

        #[cfg(feature = "esp32p4")]
        let (console_uart, mut log_uart) = (
            UartDriver::new(
                peripherals.uart0,
                pins.gpio37,
                pins.gpio38,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &uart_config,
            )?,
            uart_logger::init_uart_logger(peripherals.uart1, pins.gpio20, config::LOG_BAUD)?,
        );

        let mut console = Console::new(
            EspUartTransport::new(console_uart),
            EspPins::new(),
            EspSystem,
            &BOARD_PORTS,
            &CONSOLE_LOG_STREAM,
        );

        console.print_banner();
        loop {
            console.run_once();
            uart_logger::drain_to_uart(&CONSOLE_LOG_STREAM, &mut log_uart);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host::run();
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{self, Read, Write};
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::thread;
    use std::time::Instant;

    use gpio_console::hal::{SimulatedPins, System};
    use gpio_console::uart_logger::drain_log;
    use gpio_console::{ByteTransport, Console, BOARD_PORTS, CONSOLE_LOG_STREAM};

    /// stdin/stdout as a polled serial link.
    ///
    /// A reader thread feeds stdin bytes through a channel so that
    /// `try_receive` never blocks.
    struct StdioTransport {
        rx: Receiver<u8>,
        stdout: io::Stdout,
        closed: bool,
    }

    impl StdioTransport {
        fn spawn() -> Self {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    let Ok(byte) = byte else { break };
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
            });
            Self { rx, stdout: io::stdout(), closed: false }
        }
    }

    impl ByteTransport for StdioTransport {
        fn try_receive(&mut self) -> Option<u8> {
            match self.rx.try_recv() {
                Ok(byte) => Some(byte),
                Err(TryRecvError::Empty) => {
                    thread::yield_now();
                    None
                }
                // End of input finishes any partial line once
                Err(TryRecvError::Disconnected) if !self.closed => {
                    self.closed = true;
                    Some(b'\n')
                }
                Err(TryRecvError::Disconnected) => None,
            }
        }

        fn transmit_ready(&mut self) -> bool {
            true
        }

        fn transmit_one(&mut self, byte: u8) {
            let _ = self.stdout.write_all(&[byte]);
            let _ = self.stdout.flush();
        }
    }

    struct HostSystem {
        boot: Instant,
    }

    impl System for HostSystem {
        fn reset(&mut self) {
            drain_to_stderr();
            std::process::exit(0);
        }

        fn uptime_us(&self) -> i64 {
            self.boot.elapsed().as_micros() as i64
        }
    }

    fn drain_to_stderr() {
        let mut stderr = io::stderr();
        drain_log(&CONSOLE_LOG_STREAM, |line| {
            let _ = stderr.write_all(line);
        });
    }

    pub fn run() {
        let mut console = Console::new(
            StdioTransport::spawn(),
            SimulatedPins::new(),
            HostSystem { boot: Instant::now() },
            &BOARD_PORTS,
            &CONSOLE_LOG_STREAM,
        );

        console.print_banner();
        while !console.transport().closed {
            console.run_once();
            drain_to_stderr();
        }
    }
}
