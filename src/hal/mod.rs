//! Hardware Abstraction Layer for GpioConsole.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Console logic stays in core modules, HAL is just I/O.

pub mod gpio;
pub mod sim;
pub mod system;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use gpio::{DiscreteIo, GpioError, PinConfig, PinMode, Pull};
pub use sim::SimulatedPins;
pub use system::System;

#[cfg(target_os = "espidf")]
pub use esp::{EspPins, EspSystem, EspUartTransport};
