//! Simulated pin bank for the host build.
//!
//! Open-drain outputs only pull low; a released open-drain pin reads back
//! its pull resistor (high with pull-up or no pull, low with pull-down).

use super::gpio::{DiscreteIo, GpioError, PinConfig, PinMode, Pull};

/// Number of simulated GPIOs.
pub const SIM_GPIO_COUNT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimPin {
    config: Option<PinConfig>,
    /// Last value written by `write`
    driven: bool,
    /// Level applied from outside (test stimulus)
    external: Option<bool>,
}

impl SimPin {
    const RESET: Self = Self { config: None, driven: false, external: None };

    fn level(&self) -> bool {
        let pull_level = |pull: Pull| match pull {
            Pull::Up => true,
            Pull::Down => false,
            Pull::None => self.external.unwrap_or(false),
        };

        match self.config {
            None => self.external.unwrap_or(false),
            Some(PinConfig { mode: PinMode::Input, pull }) => {
                self.external.unwrap_or_else(|| pull_level(pull))
            }
            Some(PinConfig { mode: PinMode::OutputPushPull, .. }) => self.driven,
            Some(PinConfig { mode: PinMode::OutputOpenDrain, pull }) => {
                // Low wins on an open-drain line
                if !self.driven {
                    false
                } else if let Some(ext) = self.external {
                    ext
                } else {
                    pull_level(pull)
                }
            }
        }
    }
}

/// In-memory GPIO bank
pub struct SimulatedPins {
    pins: [SimPin; SIM_GPIO_COUNT],
}

impl SimulatedPins {
    pub const fn new() -> Self {
        Self { pins: [SimPin::RESET; SIM_GPIO_COUNT] }
    }

    /// Apply an external level to a pin (None = floating).
    pub fn set_external(&mut self, gpio: u32, level: Option<bool>) {
        if let Some(pin) = self.pins.get_mut(gpio as usize) {
            pin.external = level;
        }
    }

    /// Current configuration of a pin, if it has been configured.
    pub fn config(&self, gpio: u32) -> Option<PinConfig> {
        self.pins.get(gpio as usize).and_then(|p| p.config)
    }

    /// Last value written to a pin.
    pub fn driven(&self, gpio: u32) -> Option<bool> {
        self.pins.get(gpio as usize).map(|p| p.driven)
    }

    fn pin_mut(&mut self, gpio: u32) -> Result<&mut SimPin, GpioError> {
        self.pins.get_mut(gpio as usize).ok_or(GpioError::NoSuchPin)
    }
}

impl Default for SimulatedPins {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscreteIo for SimulatedPins {
    fn configure(&mut self, gpio: u32, config: PinConfig) -> Result<(), GpioError> {
        self.pin_mut(gpio)?.config = Some(config);
        Ok(())
    }

    fn read(&mut self, gpio: u32) -> Result<bool, GpioError> {
        Ok(self.pin_mut(gpio)?.level())
    }

    fn write(&mut self, gpio: u32, level: bool) -> Result<(), GpioError> {
        self.pin_mut(gpio)?.driven = level;
        Ok(())
    }
}
