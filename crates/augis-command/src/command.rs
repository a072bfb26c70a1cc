//! The parsed command value and its parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CommandError, CommandResult};
use crate::split::split_command;

/// Delimiter used on the controller's serial link (`"engine: 10,20"`).
pub const DEFAULT_DELIMITER: char = ':';

/// A command split into its prefix and data payload.
///
/// Both fields are owned, whichever constructor built the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Token before the first delimiter run.
    prefix: String,
    /// Remainder after the delimiter run, leading spaces removed.
    data: String,
}

impl ParsedCommand {
    /// Creates a command with an empty prefix and empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a command from explicit fields, stored exactly as given.
    pub fn from_parts(prefix: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            data: data.into(),
        }
    }

    /// Parses a delimited line with a parser that accepts empty data.
    ///
    /// # Example
    ///
    /// ```
    /// use augis_command::ParsedCommand;
    ///
    /// let cmd = ParsedCommand::parse("SET speed 42", ' ').unwrap();
    /// assert_eq!(cmd.prefix(), "SET");
    /// assert_eq!(cmd.data(), "speed 42");
    /// ```
    pub fn parse(line: &str, delimiter: char) -> CommandResult<Self> {
        CommandParser::new(delimiter).parse(line)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Consumes the command, returning `(prefix, data)`.
    pub fn into_parts(self) -> (String, String) {
        (self.prefix, self.data)
    }

    /// Renders the command as one line (without terminator).
    ///
    /// A space follows the delimiter unless the delimiter is itself a space,
    /// so `engine` / `10,20` becomes `engine: 10,20`.
    pub fn to_line(&self, delimiter: char) -> String {
        let mut line = String::with_capacity(self.prefix.len() + self.data.len() + 2);
        line.push_str(&self.prefix);
        line.push(delimiter);
        if delimiter != ' ' {
            line.push(' ');
        }
        line.push_str(&self.data);
        line
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line(DEFAULT_DELIMITER))
    }
}

impl FromStr for ParsedCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandParser::default().parse(s)
    }
}

/// Parse options for delimited command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandParser {
    /// Character separating prefix from data.
    delimiter: char,
    /// Whether a line with nothing after the delimiter parses.
    allow_empty_data: bool,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl CommandParser {
    /// Creates a parser splitting on `delimiter` that accepts empty data.
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            allow_empty_data: true,
        }
    }

    /// Sets whether a prefix followed by nothing is accepted.
    ///
    /// When disabled, such lines fail with [`CommandError::EmptyData`].
    pub fn allow_empty_data(mut self, allow: bool) -> Self {
        self.allow_empty_data = allow;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn allows_empty_data(&self) -> bool {
        self.allow_empty_data
    }

    /// Parses one line into an owned [`ParsedCommand`].
    pub fn parse(&self, line: &str) -> CommandResult<ParsedCommand> {
        let (prefix, data) = split_command(line, self.delimiter)?;

        if data.is_empty() && !self.allow_empty_data {
            return Err(CommandError::EmptyData {
                prefix: prefix.to_string(),
            });
        }

        trace!(prefix, data, "Parsed command line");
        Ok(ParsedCommand::from_parts(prefix, data))
    }
}
