//! Command Echo
//!
//! Reads command lines from stdin as if they arrived over the engine board's
//! serial port, and answers each one with `ack: <prefix>` on stdout. Logs go
//! to stderr so they never mix with replies.
//!
//! # Usage
//!
//! ```bash
//! printf 'engine: 10,-20\nheading: 90\n' | cargo run --package command-echo
//! printf 'SET speed 42\n' | cargo run --package command-echo -- --delimiter ' ' --json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use augis::prelude::*;
use augis::runtime::config::{LogOutput, validate_config};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file; searches for augis.toml when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delimiter overriding the configured one
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Print every received command as JSON on stderr
    #[arg(long)]
    json: bool,
}

struct Echo {
    json: bool,
}

#[async_trait]
impl CommandSink for Echo {
    async fn handle(&mut self, command: ParsedCommand) -> Option<ParsedCommand> {
        if self.json {
            match serde_json::to_string(&command) {
                Ok(json) => eprintln!("{json}"),
                Err(e) => error!("Failed to serialize command: {e}"),
            }
        }

        info!(prefix = command.prefix(), data = command.data(), "Acknowledging");
        Some(ParsedCommand::from_parts("ack", command.prefix()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    let mut config = loader.load()?;

    if let Some(delimiter) = args.delimiter {
        config.link.delimiter = delimiter;
        validate_config(&config)?;
    }
    // stdout carries replies
    if config.logging.output == LogOutput::Stdout {
        config.logging.output = LogOutput::Stderr;
    }
    logging::init_from_config(&config.logging)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let stream = tokio::io::join(tokio::io::stdin(), tokio::io::stdout());
    let link = CommandLink::from_config(stream, &config.link);

    let (reason, stats) = serve(link, &mut Echo { json: args.json }, cancel).await?;
    info!(?reason, ?stats, "Done");

    Ok(())
}
