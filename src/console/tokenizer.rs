//! Command line tokenizer
//!
//! Splits on ASCII whitespace. Tokens borrow from the line and keep their
//! case; matching is left to the dispatcher.

use crate::config::MAX_ARGC;

const NO_TOKEN: &[u8] = &[];

/// Tokenizer failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// Line holds more tokens than the argument vector can take
    TooManyTokens,
}

/// Tokenized command line (argc/argv)
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a, const MAX: usize = MAX_ARGC> {
    tokens: [&'a [u8]; MAX],
    argc: usize,
}

impl<'a, const MAX: usize> ParsedCommand<'a, MAX> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            tokens: [NO_TOKEN; MAX],
            argc: 0,
        }
    }

    /// Number of tokens, command name included.
    pub fn argc(&self) -> usize {
        self.argc
    }

    pub fn is_empty(&self) -> bool {
        self.argc == 0
    }

    /// First token, or None for a blank line.
    pub fn command(&self) -> Option<&'a [u8]> {
        self.token(0)
    }

    /// Token by position (0 = command name).
    pub fn token(&self, idx: usize) -> Option<&'a [u8]> {
        self.tokens[..self.argc].get(idx).copied()
    }

    /// Get argument by index (0-based, after the command name)
    pub fn arg(&self, idx: usize) -> Option<&'a [u8]> {
        self.token(idx + 1)
    }

    /// Argument as text, None if absent or not UTF-8.
    pub fn arg_str(&self, idx: usize) -> Option<&'a str> {
        self.arg(idx).and_then(|a| core::str::from_utf8(a).ok())
    }

    pub fn tokens(&self) -> &[&'a [u8]] {
        &self.tokens[..self.argc]
    }
}

/// Split a line into at most `MAX` whitespace-separated tokens.
///
/// The line ends at the first NUL, if any. A blank line yields zero
/// tokens. One token too many fails the whole line.
pub fn tokenize<const MAX: usize>(line: &[u8]) -> Result<ParsedCommand<'_, MAX>, TokenizeError> {
    let mut cmd = ParsedCommand::empty();
    let line = line.split(|&c| c == 0).next().unwrap_or(&[]);

    for token in line
        .split(|c| c.is_ascii_whitespace() || *c == 0x0B)
        .filter(|t| !t.is_empty())
    {
        if cmd.argc >= MAX {
            return Err(TokenizeError::TooManyTokens);
        }
        cmd.tokens[cmd.argc] = token;
        cmd.argc += 1;
    }

    Ok(cmd)
}

/// Tokenize with the console's default argument limit.
pub fn parse_line(line: &[u8]) -> Result<ParsedCommand<'_>, TokenizeError> {
    tokenize::<MAX_ARGC>(line)
}
