//! Driving a link into a command consumer.
//!
//! The runtime has no command table: whatever acts on a prefix lives behind
//! [`CommandSink`].

use async_trait::async_trait;
use augis_command::ParsedCommand;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::{LinkError, LinkResult};
use crate::link::{CommandLink, LinkStats};

/// Consumer of inbound commands.
#[async_trait]
pub trait CommandSink: Send {
    /// Handles one command; a returned command is written back as a reply.
    async fn handle(&mut self, command: ParsedCommand) -> Option<ParsedCommand>;
}

/// Why [`serve`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The peer closed the stream.
    Eof,
    /// The cancellation token fired.
    Cancelled,
}

/// Feeds every command from `link` into `sink` until EOF or cancellation.
///
/// I/O errors end the loop and are returned. A reply that cannot be encoded
/// is logged, counted in [`LinkStats::unsent`] and dropped.
pub async fn serve<T, S>(
    mut link: CommandLink<T>,
    sink: &mut S,
    cancel: CancellationToken,
) -> LinkResult<(StopReason, LinkStats)>
where
    T: AsyncRead + AsyncWrite + Unpin,
    S: CommandSink + ?Sized,
{
    info!("Command link started");

    let reason = loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => break StopReason::Cancelled,
            next = link.recv() => next,
        };

        let command = match next {
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                error!("Command link failed: {e}");
                return Err(e);
            }
            None => break StopReason::Eof,
        };

        let Some(reply) = sink.handle(command).await else {
            continue;
        };
        match link.send(&reply).await {
            Ok(()) => {}
            Err(LinkError::Unencodable { reason }) => {
                warn!(prefix = reply.prefix(), "Dropping reply: {reason}");
            }
            Err(e) => {
                error!("Command link failed: {e}");
                return Err(e);
            }
        }
    };

    let stats = link.stats();
    info!(
        reason = ?reason,
        received = stats.received,
        rejected = stats.rejected,
        sent = stats.sent,
        unsent = stats.unsent,
        "Command link stopped"
    );
    Ok((reason, stats))
}
