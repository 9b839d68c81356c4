//! Command handlers

use core::fmt::Write;

use super::tokenizer::ParsedCommand;
use super::ConsoleError;
use crate::config::{PortTable, BUILD_TIME, PIN_NUM_MAX, VERSION};
use crate::hal::{DiscreteIo, PinConfig, PinMode, Pull, System};

/// Collaborators a command may touch
pub struct CommandContext<'a> {
    pub pins: &'a mut dyn DiscreteIo,
    pub system: &'a mut dyn System,
    pub ports: &'a PortTable,
}

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub usage: &'static str,
    pub brief: &'static str,
    /// Exact token count required, command name included
    pub argc: Option<usize>,
    pub handler: fn(&ParsedCommand<'_>, &mut CommandContext<'_>, &mut dyn Write) -> Result<(), ConsoleError>,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        usage: "help",
        brief: "Lists commands",
        argc: None,
        handler: cmd_help,
    },
    CommandDescriptor {
        name: "dc",
        usage: "dc <port> <pin> {i|o} {up|down|nopull|pushpull}",
        brief: "Configure dio, returns OK or error message",
        argc: Some(5),
        handler: cmd_dc,
    },
    CommandDescriptor {
        name: "dr",
        usage: "dr <port> <pin>",
        brief: "Reads dio, returns 0, 1, or error message",
        argc: Some(3),
        handler: cmd_dr,
    },
    CommandDescriptor {
        name: "dw",
        usage: "dw <port> <pin> {0|1}",
        brief: "Writes dio, returns OK or error message",
        argc: Some(4),
        handler: cmd_dw,
    },
    CommandDescriptor {
        name: "reset",
        usage: "reset",
        brief: "Resets MCU",
        argc: None,
        handler: cmd_reset,
    },
    CommandDescriptor {
        name: "version",
        usage: "version",
        brief: "Writes version string",
        argc: None,
        handler: cmd_version,
    },
];

/// Find a command by name (case-insensitive)
pub fn find_command(name: &[u8]) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name.as_bytes().eq_ignore_ascii_case(name))
}

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let Some(name) = cmd.command() else {
        return Ok(()); // Empty line, do nothing
    };

    let descriptor = find_command(name).ok_or(ConsoleError::UnknownCommand)?;

    if let Some(argc) = descriptor.argc {
        if cmd.argc() != argc {
            return Err(ConsoleError::InvalidArgCount);
        }
    }

    (descriptor.handler)(cmd, ctx, out)
}

// --- Argument parsing ---

/// Resolve `<port> <pin>` (args 0 and 1) to a GPIO number.
fn resolve_pin(cmd: &ParsedCommand<'_>, ports: &PortTable) -> Result<u32, ConsoleError> {
    let port_name = match cmd.arg(0) {
        Some(&[c]) => c,
        _ => return Err(ConsoleError::InvalidPortName),
    };
    let port = ports.find(port_name).ok_or(ConsoleError::UnknownPort)?;

    let pin: u32 = cmd
        .arg_str(1)
        .and_then(|s| s.parse().ok())
        .ok_or(ConsoleError::InvalidPin)?;
    if pin > PIN_NUM_MAX {
        return Err(ConsoleError::PinOutOfRange);
    }

    port.gpio(pin).ok_or(ConsoleError::PinOutOfRange)
}

/// Parse `{i|o} {up|down|nopull|pushpull}`.
///
/// `pushpull` overrides the direction: the pin becomes a push-pull output
/// with no pull resistor.
pub fn parse_pin_config(direction: &[u8], circuit: &[u8]) -> Result<PinConfig, ConsoleError> {
    let mode = if direction.eq_ignore_ascii_case(b"i") {
        PinMode::Input
    } else if direction.eq_ignore_ascii_case(b"o") {
        PinMode::OutputOpenDrain
    } else {
        return Err(ConsoleError::InvalidDirection);
    };

    let config = if circuit.eq_ignore_ascii_case(b"up") {
        PinConfig { mode, pull: Pull::Up }
    } else if circuit.eq_ignore_ascii_case(b"down") {
        PinConfig { mode, pull: Pull::Down }
    } else if circuit.eq_ignore_ascii_case(b"nopull") {
        PinConfig { mode, pull: Pull::None }
    } else if circuit.eq_ignore_ascii_case(b"pushpull") {
        PinConfig { mode: PinMode::OutputPushPull, pull: Pull::None }
    } else {
        return Err(ConsoleError::InvalidMode);
    };

    Ok(config)
}

// --- Command Implementations ---

fn cmd_help(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        // Help for specific command
        let c = find_command(name).ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}\n  {}", c.usage, c.brief);
        return Ok(());
    }

    for c in COMMANDS.iter().filter(|c| c.name != "help") {
        let _ = writeln!(out, "{}\n  {}", c.usage, c.brief);
    }

    let _ = write!(out, "Ports:");
    for port in ctx.ports.iter() {
        let _ = write!(out, " {}", port.name as char);
    }
    let _ = writeln!(out);
    Ok(())
}

fn cmd_dc(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let gpio = resolve_pin(cmd, ctx.ports)?;
    let direction = cmd.arg(2).ok_or(ConsoleError::InvalidArgCount)?;
    let circuit = cmd.arg(3).ok_or(ConsoleError::InvalidArgCount)?;

    let config = parse_pin_config(direction, circuit)?;
    ctx.pins.configure(gpio, config)?;

    let _ = writeln!(out, "OK");
    Ok(())
}

fn cmd_dr(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let gpio = resolve_pin(cmd, ctx.ports)?;
    let level = ctx.pins.read(gpio)?;

    let _ = writeln!(out, "\"{}\"", u8::from(level));
    Ok(())
}

fn cmd_dw(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let gpio = resolve_pin(cmd, ctx.ports)?;

    let level = match cmd.arg(2) {
        Some(b"0") => false,
        Some(b"1") => true,
        _ => return Err(ConsoleError::InvalidValue),
    };
    ctx.pins.write(gpio, level)?;

    let _ = writeln!(out, "OK");
    Ok(())
}

fn cmd_reset(
    _cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_>,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    ctx.system.reset();
    Ok(())
}

fn cmd_version(
    _cmd: &ParsedCommand<'_>,
    _ctx: &mut CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let _ = writeln!(out, "Built=\"{}\" Version=\"{}\"", BUILD_TIME, VERSION);
    Ok(())
}
