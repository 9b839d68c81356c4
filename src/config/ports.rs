//! GPIO port table.
//!
//! The console addresses pins as `<port letter> <pin>`. ESP32 parts number
//! their GPIOs linearly, so each port is a window of up to 16 GPIOs.

/// One addressable port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInfo {
    /// Upper-case port letter.
    pub name: u8,
    /// GPIO number of pin 0 in this port.
    pub first_gpio: u8,
    /// Number of pins wired in this port.
    pub pin_count: u8,
}

impl PortInfo {
    pub const fn new(name: u8, first_gpio: u8, pin_count: u8) -> Self {
        Self { name, first_gpio, pin_count }
    }

    /// GPIO number for `pin`, or None if the port has no such pin.
    pub fn gpio(&self, pin: u32) -> Option<u32> {
        if pin < u32::from(self.pin_count) {
            Some(u32::from(self.first_gpio) + pin)
        } else {
            None
        }
    }
}

/// Mapping from port letters to GPIO windows.
#[derive(Debug, Clone, Copy)]
pub struct PortTable {
    ports: &'static [PortInfo],
}

impl PortTable {
    pub const fn new(ports: &'static [PortInfo]) -> Self {
        Self { ports }
    }

    /// Look up a port by letter (case-insensitive).
    pub fn find(&self, name: u8) -> Option<&PortInfo> {
        let name = name.to_ascii_uppercase();
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static PortInfo> {
        self.ports.iter()
    }
}

/// ESP32-S3: GPIO0..=GPIO47 usable as three ports.
#[cfg(not(feature = "esp32p4"))]
pub static BOARD_PORTS: PortTable = PortTable::new(&[
    PortInfo::new(b'A', 0, 16),
    PortInfo::new(b'B', 16, 16),
    PortInfo::new(b'C', 32, 16),
]);

/// ESP32-P4: GPIO0..=GPIO54.
#[cfg(feature = "esp32p4")]
pub static BOARD_PORTS: PortTable = PortTable::new(&[
    PortInfo::new(b'A', 0, 16),
    PortInfo::new(b'B', 16, 16),
    PortInfo::new(b'C', 32, 16),
    PortInfo::new(b'D', 48, 7),
]);
