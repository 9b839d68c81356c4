//! Command handler tests

use gpio_console::config::{PortInfo, PortTable, BOARD_PORTS};
use gpio_console::console::commands::{execute, parse_pin_config, CommandContext, COMMANDS};
use gpio_console::console::tokenizer::parse_line;
use gpio_console::console::ConsoleError;
use gpio_console::hal::{DiscreteIo, PinConfig, PinMode, Pull, SimulatedPins, System};

static TEST_PORTS: PortTable = PortTable::new(&[
    PortInfo::new(b'A', 0, 16),
    PortInfo::new(b'B', 16, 16),
    PortInfo::new(b'C', 32, 4),
]);

#[derive(Default)]
struct FakeSystem {
    resets: u32,
}

impl System for FakeSystem {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn uptime_us(&self) -> i64 {
        0
    }
}

struct Bench {
    pins: SimulatedPins,
    system: FakeSystem,
}

impl Bench {
    fn new() -> Self {
        Self { pins: SimulatedPins::new(), system: FakeSystem::default() }
    }

    fn run(&mut self, line: &str) -> (Result<(), ConsoleError>, TestOutput) {
        let cmd = parse_line(line.as_bytes()).unwrap();
        let mut output = TestOutput::new();
        let mut ctx = CommandContext {
            pins: &mut self.pins,
            system: &mut self.system,
            ports: &TEST_PORTS,
        };
        let result = execute(&cmd, &mut ctx, &mut output);
        (result, output)
    }
}

#[test]
fn test_command_registry_has_all_commands() {
    let expected = ["help", "dc", "dr", "dw", "reset", "version"];

    for name in expected {
        assert!(
            COMMANDS.iter().any(|c| c.name == name),
            "Command '{}' should be in registry",
            name
        );
    }
}

#[test]
fn test_execute_empty_line() {
    let (result, output) = Bench::new().run("");

    assert_eq!(result, Ok(()));
    assert_eq!(output.as_str(), "");
}

#[test]
fn test_execute_unknown_command() {
    let (result, _) = Bench::new().run("foobar");

    assert_eq!(result, Err(ConsoleError::UnknownCommand));
}

#[test]
fn test_execute_help() {
    let (result, output) = Bench::new().run("help");

    assert!(result.is_ok());
    assert!(output.contains("dc <port> <pin> {i|o} {up|down|nopull|pushpull}"));
    assert!(output.contains("dr <port> <pin>"));
    assert!(output.contains("dw <port> <pin> {0|1}"));
    assert!(output.contains("Resets MCU"));
    assert!(output.contains("Ports: A B C"));
}

#[test]
fn test_execute_help_for_command() {
    let (result, output) = Bench::new().run("help DW");

    assert!(result.is_ok());
    assert_eq!(output.as_str(), "dw <port> <pin> {0|1}\n  Writes dio, returns OK or error message\n");
}

#[test]
fn test_command_names_case_insensitive() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("DC a 1 I Up").0, Ok(()));
    assert_eq!(
        bench.pins.config(1),
        Some(PinConfig { mode: PinMode::Input, pull: Pull::Up })
    );
}

#[test]
fn test_dc_configures_pin() {
    let mut bench = Bench::new();
    let (result, output) = bench.run("dc b 2 o nopull");

    assert_eq!(result, Ok(()));
    assert_eq!(output.as_str(), "OK\n");
    assert_eq!(
        bench.pins.config(18),
        Some(PinConfig { mode: PinMode::OutputOpenDrain, pull: Pull::None })
    );
}

#[test]
fn test_dc_pushpull_overrides_direction() {
    let mut bench = Bench::new();
    bench.run("dc a 4 i pushpull").0.unwrap();

    assert_eq!(
        bench.pins.config(4),
        Some(PinConfig { mode: PinMode::OutputPushPull, pull: Pull::None })
    );
}

#[test]
fn test_dc_invalid_direction_and_mode() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("dc a 4 x up").0, Err(ConsoleError::InvalidDirection));
    assert_eq!(bench.run("dc a 4 o sideways").0, Err(ConsoleError::InvalidMode));
    assert_eq!(bench.pins.config(4), None);
}

#[test]
fn test_parse_pin_config() {
    assert_eq!(
        parse_pin_config(b"o", b"DOWN"),
        Ok(PinConfig { mode: PinMode::OutputOpenDrain, pull: Pull::Down })
    );
    assert_eq!(parse_pin_config(b"in", b"up"), Err(ConsoleError::InvalidDirection));
}

#[test]
fn test_argument_count_checked() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("dc a 4 o").0, Err(ConsoleError::InvalidArgCount));
    assert_eq!(bench.run("dr a").0, Err(ConsoleError::InvalidArgCount));
    assert_eq!(bench.run("dw a 1 1 1").0, Err(ConsoleError::InvalidArgCount));
}

#[test]
fn test_port_validation() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("dr ab 1").0, Err(ConsoleError::InvalidPortName));
    assert_eq!(bench.run("dr z 1").0, Err(ConsoleError::UnknownPort));
}

#[test]
fn test_pin_validation() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("dr a x1").0, Err(ConsoleError::InvalidPin));
    assert_eq!(bench.run("dr a -1").0, Err(ConsoleError::InvalidPin));
    assert_eq!(bench.run("dr a 16").0, Err(ConsoleError::PinOutOfRange));
    // Port C only wires four pins
    assert_eq!(bench.run("dr c 4").0, Err(ConsoleError::PinOutOfRange));
    assert_eq!(bench.run("dr c 3").0, Ok(()));
}

#[test]
fn test_dw_then_dr() {
    let mut bench = Bench::new();
    bench.run("dc a 9 o pushpull").0.unwrap();

    let (result, output) = bench.run("dw a 9 1");
    assert_eq!(result, Ok(()));
    assert_eq!(output.as_str(), "OK\n");
    assert_eq!(bench.pins.driven(9), Some(true));

    let (result, output) = bench.run("dr A 9");
    assert_eq!(result, Ok(()));
    assert_eq!(output.as_str(), "\"1\"\n");

    bench.run("dw a 9 0").0.unwrap();
    assert_eq!(bench.run("dr a 9").1.as_str(), "\"0\"\n");
}

#[test]
fn test_dr_reads_input() {
    let mut bench = Bench::new();
    bench.run("dc b 0 i down").0.unwrap();

    assert_eq!(bench.run("dr b 0").1.as_str(), "\"0\"\n");
    bench.pins.set_external(16, Some(true));
    assert_eq!(bench.run("dr b 0").1.as_str(), "\"1\"\n");
}

#[test]
fn test_dw_invalid_value() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("dw a 1 2").0, Err(ConsoleError::InvalidValue));
    assert_eq!(bench.run("dw a 1 on").0, Err(ConsoleError::InvalidValue));
    assert_eq!(bench.pins.driven(1), Some(false));
}

#[test]
fn test_reset() {
    let mut bench = Bench::new();

    assert_eq!(bench.run("reset").0, Ok(()));
    assert_eq!(bench.system.resets, 1);
}

#[test]
fn test_version() {
    let (result, output) = Bench::new().run("version");

    assert!(result.is_ok());
    assert!(output.as_str().starts_with("Built=\""));
    assert!(output.contains("Version=\"GpioConsole v"));
}

#[test]
fn test_gpio_driver_error_reported() {
    struct BrokenPins;

    impl DiscreteIo for BrokenPins {
        fn configure(&mut self, _gpio: u32, _config: PinConfig) -> Result<(), gpio_console::hal::GpioError> {
            Err(gpio_console::hal::GpioError::Driver(-1))
        }
        fn read(&mut self, _gpio: u32) -> Result<bool, gpio_console::hal::GpioError> {
            Err(gpio_console::hal::GpioError::NoSuchPin)
        }
        fn write(&mut self, _gpio: u32, _level: bool) -> Result<(), gpio_console::hal::GpioError> {
            Ok(())
        }
    }

    let mut pins = BrokenPins;
    let mut system = FakeSystem::default();
    let mut ctx = CommandContext { pins: &mut pins, system: &mut system, ports: &TEST_PORTS };

    let cmd = parse_line(b"dc a 1 i up").unwrap();
    let err = execute(&cmd, &mut ctx, &mut TestOutput::new()).unwrap_err();
    assert_eq!(err.to_string(), "Error: GPIO driver failure (-1)");

    let cmd = parse_line(b"dr a 1").unwrap();
    let err = execute(&cmd, &mut ctx, &mut TestOutput::new()).unwrap_err();
    assert_eq!(err.to_string(), "Error: GPIO not available");
}

#[test]
fn test_error_display() {
    assert_eq!(ConsoleError::UnknownCommand.to_string(), "Error: Unknown command");
    assert_eq!(ConsoleError::PinOutOfRange.to_string(), "Error: Out of range GPIO pin");
    assert_eq!(ConsoleError::TooManyTokens.to_string(), "Error: Too many tokens");
}

#[test]
fn test_board_ports_start_at_a() {
    let a = BOARD_PORTS.find(b'a').expect("port A");

    assert_eq!(a.name, b'A');
    assert_eq!(a.gpio(0), Some(0));
}

// Test output buffer
struct TestOutput {
    buf: [u8; 1024],
    len: usize,
}

impl TestOutput {
    fn new() -> Self {
        Self { buf: [0u8; 1024], len: 0 }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    fn contains(&self, s: &str) -> bool {
        self.as_str().contains(s)
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let available = self.buf.len() - self.len;
        let to_copy = bytes.len().min(available);
        self.buf[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}
