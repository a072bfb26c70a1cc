//! # AUGIS
//!
//! Command protocol toolkit for the AUGIS engine controller.
//!
//! ```text
//! ┌──────────────┐  "engine: 10,-20\n"  ┌──────────────┐  ParsedCommand  ┌─────────────┐
//! │ serial / TCP │─────────────────────▶│ CommandLink  │────────────────▶│ CommandSink │
//! │   stream     │◀─────────────────────│ (line codec) │◀────────────────│  (yours)    │
//! └──────────────┘      replies         └──────────────┘     replies     └─────────────┘
//! ```
//!
//! - [`command`]: splitting one line into prefix and data
//! - [`runtime`]: codec, link, serve loop, configuration, logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use augis::prelude::*;
//!
//! struct Ack;
//!
//! #[async_trait]
//! impl CommandSink for Ack {
//!     async fn handle(&mut self, command: ParsedCommand) -> Option<ParsedCommand> {
//!         Some(ParsedCommand::from_parts("ack", command.prefix()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     let link = CommandLink::from_config(tokio::io::join(tokio::io::stdin(), tokio::io::stdout()), &config.link);
//!     serve(link, &mut Ack, CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default): load `augis.toml` files
//! - `json-log`: JSON log output

pub use augis_command as command;
pub use augis_runtime as runtime;

pub use augis_command::{CommandError, CommandParser, ParsedCommand};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use augis_command::{
        CommandError, CommandParser, DEFAULT_DELIMITER, ErrorKind, ParsedCommand, split_command,
    };
    pub use augis_runtime::{
        AugisConfig, CancellationToken, CommandLink, CommandSink, ConfigLoader, LinkConfig,
        LinkStats, LoggingBuilder, StopReason, async_trait, logging, serve,
    };
    pub use augis_runtime::tracing::{debug, error, info, trace, warn};
}
