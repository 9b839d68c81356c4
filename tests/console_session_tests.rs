//! End-to-end console sessions over a scripted serial link

use std::collections::VecDeque;

use gpio_console::console::{Console, ConsoleError, LineOutcome};
use gpio_console::hal::{DiscreteIo, GpioError, PinConfig, PinMode, SimulatedPins, System};
use gpio_console::logging::{LogLevel, LogStream};
use gpio_console::transport::ByteTransport;
use gpio_console::BOARD_PORTS;

/// Loopback terminal: always ready to transmit, input scripted.
struct Terminal {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl Terminal {
    fn new(input: &str) -> Self {
        Self { input: input.bytes().collect(), output: Vec::new() }
    }

    fn take_output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.output)).unwrap()
    }
}

impl ByteTransport for Terminal {
    fn try_receive(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn transmit_ready(&mut self) -> bool {
        true
    }

    fn transmit_one(&mut self, byte: u8) {
        self.output.push(byte);
    }
}

#[derive(Default)]
struct FakeSystem {
    resets: u32,
}

impl System for FakeSystem {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn uptime_us(&self) -> i64 {
        500
    }
}

type TestConsole<'a> = Console<'a, Terminal, SimulatedPins, FakeSystem>;

fn console<'a>(input: &str, log: &'a LogStream) -> TestConsole<'a> {
    Console::new(Terminal::new(input), SimulatedPins::new(), FakeSystem::default(), &BOARD_PORTS, log)
}

#[test]
fn test_banner() {
    let log = LogStream::new();
    let mut con = console("", &log);

    con.print_banner();
    assert_eq!(con.transport_mut().take_output(), "\n\rStarting\n\r");
}

#[test]
fn test_prompt_echo_and_response() {
    let log = LogStream::new();
    let mut con = console("dc a 5 o pushpull\r", &log);

    assert_eq!(con.run_once(), LineOutcome::Done);
    assert_eq!(con.transport_mut().take_output(), "> dc a 5 o pushpull\n\rOK\n\r");
    assert_eq!(con.pins().config(5).map(|c| c.mode), Some(PinMode::OutputPushPull));
}

#[test]
fn test_write_then_read_session() {
    let log = LogStream::new();
    let mut con = console("dc b 1 o pushpull\ndw b 1 1\ndr b 1\n", &log);

    for _ in 0..3 {
        assert_eq!(con.run_once(), LineOutcome::Done);
    }

    let out = con.transport_mut().take_output();
    assert!(out.ends_with("> dr b 1\n\r\"1\"\n\r"), "got {:?}", out);
}

#[test]
fn test_blank_line_only_prompts() {
    let log = LogStream::new();
    let mut con = console("   \r", &log);

    assert_eq!(con.run_once(), LineOutcome::Empty);
    assert_eq!(con.transport_mut().take_output(), ">    \n\r");
}

#[test]
fn test_backspace_corrected_command() {
    let log = LogStream::new();
    let mut con = console("verx\x08sion\r", &log);

    assert_eq!(con.run_once(), LineOutcome::Done);
    let out = con.transport_mut().take_output();
    assert!(out.starts_with("> verx\x08 \x08sion\n\rBuilt=\""), "got {:?}", out);
}

#[test]
fn test_unknown_command_reports_error() {
    let log = LogStream::new();
    let mut con = console("blink\n", &log);

    assert_eq!(con.run_once(), LineOutcome::Failed(ConsoleError::UnknownCommand));
    assert_eq!(con.transport_mut().take_output(), "> blink\n\rError: Unknown command\n\r");
}

#[test]
fn test_too_many_tokens_aborts_line() {
    let log = LogStream::new();
    let mut con = console("dw a 1 1 x x x x x\rdr a 1\r", &log);

    assert_eq!(con.run_once(), LineOutcome::Failed(ConsoleError::TooManyTokens));
    let out = con.transport_mut().take_output();
    assert!(out.ends_with("Error: Too many tokens\n\r"));
    assert_eq!(con.pins().driven(1), Some(false));

    // Next line is processed normally
    assert_eq!(con.run_once(), LineOutcome::Done);
}

#[test]
fn test_reset_command() {
    let log = LogStream::new();
    let mut con = console("reset\r", &log);

    assert_eq!(con.run_once(), LineOutcome::Done);
    assert_eq!(con.system().resets, 1);
}

#[test]
fn test_silent_drops_are_logged() {
    let log = LogStream::new();
    let long: String = std::iter::repeat('x').take(90).collect();
    let mut con = console(&format!("\x08{}\r", long), &log);

    con.run_once();

    let mut messages = Vec::new();
    while let Some(entry) = log.drain() {
        messages.push((entry.level, entry.timestamp_us, entry.message().to_string()));
    }

    assert!(messages.contains(&(LogLevel::Warn, 500, "line full, dropped 12 chars".to_string())));
    assert!(messages.contains(&(LogLevel::Debug, 500, "ignored 1 backspaces".to_string())));
    assert!(messages.contains(&(LogLevel::Debug, 500, "line complete, 78 bytes".to_string())));
}

#[test]
fn test_dispatch_errors_are_logged() {
    let log = LogStream::new();
    let mut con = console("dr q 1\r", &log);

    assert_eq!(con.run_once(), LineOutcome::Failed(ConsoleError::UnknownPort));

    let mut found = false;
    while let Some(entry) = log.drain() {
        if entry.level == LogLevel::Warn && entry.message() == "dr: Unknown GPIO port" {
            found = true;
        }
    }
    assert!(found);
}

#[test]
fn test_nul_on_the_wire_ends_the_command() {
    let log = LogStream::new();
    let mut con = console("version\0junk\r", &log);

    assert_eq!(con.run_once(), LineOutcome::Done);
    let out = con.transport_mut().take_output();
    assert!(out.contains("Built=\""), "got {:?}", out);
}

/// Pin bank whose driver rejects every call.
struct BrokenPins;

impl DiscreteIo for BrokenPins {
    fn configure(&mut self, _gpio: u32, _config: PinConfig) -> Result<(), GpioError> {
        Err(GpioError::Driver(-1))
    }

    fn read(&mut self, _gpio: u32) -> Result<bool, GpioError> {
        Err(GpioError::Driver(-1))
    }

    fn write(&mut self, _gpio: u32, _level: bool) -> Result<(), GpioError> {
        Err(GpioError::Driver(-1))
    }
}

#[test]
fn test_driver_failures_are_logged_as_errors() {
    let log = LogStream::new();
    let mut con = Console::new(
        Terminal::new("dw a 1 1\r"),
        BrokenPins,
        FakeSystem::default(),
        &BOARD_PORTS,
        &log,
    );

    assert_eq!(con.run_once(), LineOutcome::Failed(ConsoleError::Gpio(GpioError::Driver(-1))));
    let out = con.transport_mut().take_output();
    assert!(out.ends_with("Error: GPIO driver failure (-1)\n\r"), "got {:?}", out);

    let mut errors = Vec::new();
    while let Some(entry) = log.drain() {
        if entry.level == LogLevel::Error {
            errors.push(entry.message().to_string());
        }
    }
    assert_eq!(errors, ["dw: gpio driver error -1"]);
}
