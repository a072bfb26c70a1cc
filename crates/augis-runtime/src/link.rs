//! A framed command link over any async byte stream.
//!
//! The controller talks to the engine board over a serial line, but the link
//! only needs `AsyncRead + AsyncWrite`, so TCP sockets, pipes and in-memory
//! streams work the same way.
//!
//! ```rust,ignore
//! use augis_runtime::{CommandLink, LinkConfig};
//!
//! let mut link = CommandLink::from_config(stream, &LinkConfig::default());
//! while let Some(command) = link.recv().await {
//!     let command = command?;
//!     tracing::info!(prefix = command.prefix(), "got command");
//! }
//! ```

use std::sync::Arc;

use augis_command::ParsedCommand;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::codec::CommandCodec;
use crate::config::LinkConfig;
use crate::error::{LineRejected, LinkError, LinkResult};

/// Counters for one link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Well-formed commands received.
    pub received: u64,
    /// Inbound lines that were dropped.
    pub rejected: u64,
    /// Commands written.
    pub sent: u64,
    /// Outbound commands refused by the encoder.
    pub unsent: u64,
}

/// Reads and writes [`ParsedCommand`]s, one per line.
pub struct CommandLink<T> {
    /// The stream and its line codec.
    framed: Framed<T, CommandCodec>,
    /// Counters shared with [`StatsHandle`]s.
    stats: Arc<Mutex<LinkStats>>,
}

impl<T> CommandLink<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(io: T, codec: CommandCodec) -> Self {
        Self {
            framed: Framed::new(io, codec),
            stats: Arc::new(Mutex::new(LinkStats::default())),
        }
    }

    pub fn from_config(io: T, config: &LinkConfig) -> Self {
        Self::new(io, CommandCodec::from_config(config))
    }

    /// Receives the next well-formed command.
    ///
    /// Rejected lines are logged, counted and skipped. Returns `None` once
    /// the stream reaches EOF.
    pub async fn recv(&mut self) -> Option<LinkResult<ParsedCommand>> {
        loop {
            match self.framed.next().await? {
                Ok(Ok(command)) => {
                    self.stats.lock().received += 1;
                    debug!(prefix = command.prefix(), data = command.data(), "Received command");
                    return Some(Ok(command));
                }
                Ok(Err(rejected)) => {
                    self.stats.lock().rejected += 1;
                    log_rejected(&rejected);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Writes one command and flushes it.
    ///
    /// A command that cannot be written as one line is counted as unsent
    /// and returned as [`LinkError::Unencodable`]; the link stays usable.
    pub async fn send(&mut self, command: &ParsedCommand) -> LinkResult<()> {
        if let Err(e) = self.framed.send(command).await {
            if matches!(e, LinkError::Unencodable { .. }) {
                self.stats.lock().unsent += 1;
            }
            return Err(e);
        }
        self.stats.lock().sent += 1;
        debug!(prefix = command.prefix(), data = command.data(), "Sent command");
        Ok(())
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> LinkStats {
        *self.stats.lock()
    }

    /// Returns a handle that keeps reading the counters after the link moves
    /// into a task.
    pub fn stats_handle(&self) -> StatsHandle {
        StatsHandle(Arc::clone(&self.stats))
    }

    /// Consumes the link, returning the underlying stream.
    pub fn into_inner(self) -> T {
        self.framed.into_inner()
    }
}

/// Shared read access to a link's [`LinkStats`].
#[derive(Debug, Clone)]
pub struct StatsHandle(Arc<Mutex<LinkStats>>);

impl StatsHandle {
    pub fn get(&self) -> LinkStats {
        *self.0.lock()
    }
}

fn log_rejected(rejected: &LineRejected) {
    match rejected {
        LineRejected::TooLong { max } => {
            warn!(max_line_length = max, "Discarding over-long line");
        }
        LineRejected::Malformed { line, source } => {
            warn!(line = %line, kind = %source.kind(), "Discarding malformed command: {source}");
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::io::Builder;

    use super::*;

    #[tokio::test]
    async fn test_recv_skips_rejected_lines() {
        let io = Builder::new()
            .read(b"engine: 10,20\nnonsense\n")
            .read(b"heading:  180\n")
            .build();
        let mut link = CommandLink::from_config(io, &LinkConfig::default());

        let first = link.recv().await.unwrap().unwrap();
        assert_eq!(first, ParsedCommand::from_parts("engine", "10,20"));

        let second = link.recv().await.unwrap().unwrap();
        assert_eq!(second, ParsedCommand::from_parts("heading", "180"));

        assert!(link.recv().await.is_none());
        assert_eq!(
            link.stats(),
            LinkStats {
                received: 2,
                rejected: 1,
                sent: 0,
                unsent: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_send_writes_one_line() {
        let io = Builder::new().write(b"engine: -40,40\n").build();
        let mut link = CommandLink::from_config(io, &LinkConfig::default());

        link.send(&ParsedCommand::from_parts("engine", "-40,40"))
            .await
            .unwrap();
        assert_eq!(link.stats().sent, 1);
    }

    #[tokio::test]
    async fn test_send_refuses_unencodable_command() {
        let io = Builder::new().build();
        let mut link = CommandLink::from_config(io, &LinkConfig::default());

        let result = link.send(&ParsedCommand::new()).await;
        assert!(matches!(result, Err(LinkError::Unencodable { .. })));
        assert_eq!(link.stats().sent, 0);
        assert_eq!(link.stats().unsent, 1);
    }

    #[tokio::test]
    async fn test_round_trip_over_duplex() {
        let config = LinkConfig {
            delimiter: ' ',
            ..Default::default()
        };
        let (a, b) = tokio::io::duplex(64);
        let mut pi = CommandLink::from_config(a, &config);
        let mut board = CommandLink::from_config(b, &config);

        let command = ParsedCommand::from_parts("SET", "speed 42");
        pi.send(&command).await.unwrap();
        assert_eq!(board.recv().await.unwrap().unwrap(), command);

        let handle = board.stats_handle();
        drop(pi);
        assert!(board.recv().await.is_none());
        assert_eq!(handle.get().received, 1);
    }
}
