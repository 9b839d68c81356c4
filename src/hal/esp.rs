//! ESP-IDF implementations of the console collaborators.
//!
//! Thin wrappers only. Pins go through the IDF GPIO driver by number so
//! the port table can address any GPIO without owning a `PinDriver` each.

use esp_idf_svc::hal::uart::UartDriver;
use esp_idf_svc::sys as esp_idf_sys;

use super::gpio::{DiscreteIo, GpioError, PinConfig, PinMode, Pull};
use super::system::System;
use crate::transport::ByteTransport;

/// Console transport over an installed IDF UART driver.
pub struct EspUartTransport<'d> {
    uart: UartDriver<'d>,
}

impl<'d> EspUartTransport<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }
}

impl ByteTransport for EspUartTransport<'_> {
    fn try_receive(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, esp_idf_svc::hal::delay::NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn transmit_ready(&mut self) -> bool {
        // Zero-tick wait: ESP_OK only once the TX FIFO has drained
        // SAFETY: the port belongs to the driver we own, which keeps it installed
        let err = unsafe { esp_idf_sys::uart_wait_tx_done(self.uart.port(), 0) };
        esp_idf_sys::EspError::convert(err).is_ok()
    }

    fn transmit_one(&mut self, byte: u8) {
        let _ = self.uart.write(&[byte]);
    }
}

/// GPIO access through `gpio_config` / `gpio_get_level` / `gpio_set_level`.
pub struct EspPins;

impl EspPins {
    pub const fn new() -> Self {
        Self
    }
}

fn check(err: esp_idf_sys::esp_err_t) -> Result<(), GpioError> {
    esp_idf_sys::EspError::convert(err).map_err(|e| {
        if e.code() == esp_idf_sys::ESP_ERR_INVALID_ARG as esp_idf_sys::esp_err_t {
            GpioError::NoSuchPin
        } else {
            GpioError::Driver(e.code())
        }
    })
}

impl DiscreteIo for EspPins {
    fn configure(&mut self, gpio: u32, config: PinConfig) -> Result<(), GpioError> {
        if gpio >= 64 {
            return Err(GpioError::NoSuchPin);
        }

        // Outputs keep the input path enabled so `dr` reads the pad level
        let mode = match config.mode {
            PinMode::Input => esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT,
            PinMode::OutputOpenDrain => esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
            PinMode::OutputPushPull => esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
        };

        let (pull_up, pull_down) = match config.pull {
            Pull::Up => (
                esp_idf_sys::gpio_pullup_t_GPIO_PULLUP_ENABLE,
                esp_idf_sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            ),
            Pull::Down => (
                esp_idf_sys::gpio_pullup_t_GPIO_PULLUP_DISABLE,
                esp_idf_sys::gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            ),
            Pull::None => (
                esp_idf_sys::gpio_pullup_t_GPIO_PULLUP_DISABLE,
                esp_idf_sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            ),
        };

        let io_conf = esp_idf_sys::gpio_config_t {
            pin_bit_mask: 1u64 << gpio,
            mode,
            pull_up_en: pull_up,
            pull_down_en: pull_down,
            intr_type: esp_idf_sys::gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };

        // SAFETY: gpio_config only reads the struct we pass
        check(unsafe { esp_idf_sys::gpio_config(&io_conf) })
    }

    fn read(&mut self, gpio: u32) -> Result<bool, GpioError> {
        if gpio >= 64 {
            return Err(GpioError::NoSuchPin);
        }
        // SAFETY: gpio < 64, the driver rejects numbers the chip lacks
        let level = unsafe { esp_idf_sys::gpio_get_level(gpio as esp_idf_sys::gpio_num_t) };
        Ok(level != 0)
    }

    fn write(&mut self, gpio: u32, level: bool) -> Result<(), GpioError> {
        if gpio >= 64 {
            return Err(GpioError::NoSuchPin);
        }
        // SAFETY: gpio < 64, the driver rejects numbers the chip lacks
        check(unsafe {
            esp_idf_sys::gpio_set_level(gpio as esp_idf_sys::gpio_num_t, u32::from(level))
        })
    }
}

/// Reset and uptime via IDF system calls.
pub struct EspSystem;

impl System for EspSystem {
    fn reset(&mut self) {
        // SAFETY: esp_restart takes no arguments and does not return
        unsafe {
            esp_idf_sys::esp_restart();
        }
    }

    fn uptime_us(&self) -> i64 {
        // SAFETY: the esp_timer is started by the IDF before app main
        unsafe { esp_idf_sys::esp_timer_get_time() }
    }
}
