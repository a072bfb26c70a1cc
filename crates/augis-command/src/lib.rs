//! Command line parsing for the AUGIS engine controller.
//!
//! Controller messages arrive as single lines made of a prefix and a data
//! payload separated by a delimiter, e.g. `engine: 10,-20`. This crate splits
//! such lines into a [`ParsedCommand`]:
//!
//! ```
//! use augis_command::{CommandError, CommandParser, ParsedCommand};
//!
//! let cmd: ParsedCommand = "engine: 10,-20".parse().unwrap();
//! assert_eq!(cmd.prefix(), "engine");
//! assert_eq!(cmd.data(), "10,-20");
//!
//! let err = CommandParser::new(' ').parse("hello").unwrap_err();
//! assert_eq!(err, CommandError::MissingDelimiter { delimiter: ' ' });
//! ```
//!
//! What a prefix means, and how its data is interpreted, is up to the caller.

pub mod command;
pub mod error;
pub mod split;

pub use command::{CommandParser, DEFAULT_DELIMITER, ParsedCommand};
pub use error::{CommandError, CommandResult, ErrorKind};
pub use split::{split_command, trim_leading_spaces};
