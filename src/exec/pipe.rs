// src/exec/pipe.rs

//! Byte forwarding between a command's output and another stream.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::errors::CommandError;

use super::stream::{CommandReader, CommandWriter};

/// Forward `upstream` into `downstream` in a background task.
///
/// When the upstream output ends (or fails) the downstream input is closed,
/// so the downstream command sees EOF. Upstream failures are logged only;
/// the downstream command reports its own outcome.
pub fn forward(
    mut upstream: CommandReader,
    mut downstream: CommandWriter,
    from: String,
    to: String,
) {
    tokio::spawn(async move {
        match tokio::io::copy(&mut upstream, &mut downstream).await {
            Ok(bytes) => debug!(from = %from, to = %to, bytes, "pipe finished"),
            Err(err) => warn!(
                from = %from,
                to = %to,
                error = %err,
                "pipe source failed; closing downstream input"
            ),
        }

        if let Err(err) = downstream.shutdown().await {
            debug!(to = %to, error = %err, "closing downstream input failed");
        }
    });
}

/// Copy all of `upstream` into `sink`, then shut the sink down and return it.
pub async fn drain_into<W>(mut upstream: CommandReader, mut sink: W) -> Result<W, CommandError>
where
    W: AsyncWrite + Unpin,
{
    let bytes = tokio::io::copy(&mut upstream, &mut sink).await?;
    sink.shutdown().await?;
    debug!(bytes, "command output written to sink");
    Ok(sink)
}
