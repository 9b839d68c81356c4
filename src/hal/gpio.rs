//! GPIO HAL for discrete pin configuration, read and write.

/// Pin electrical mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    OutputOpenDrain,
    OutputPushPull,
}

/// Internal resistor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
    None,
}

/// Full pin configuration as requested by `dc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub mode: PinMode,
    pub pull: Pull,
}

/// GPIO driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// GPIO number not present on this chip
    NoSuchPin,
    /// Driver returned an error code
    Driver(i32),
}

/// Discrete I/O pins addressed by GPIO number.
pub trait DiscreteIo {
    fn configure(&mut self, gpio: u32, config: PinConfig) -> Result<(), GpioError>;

    /// Read the input level (true = high).
    fn read(&mut self, gpio: u32) -> Result<bool, GpioError>;

    /// Drive the output level (true = high).
    fn write(&mut self, gpio: u32, level: bool) -> Result<(), GpioError>;
}
