//! JSONL replay event source.
//!
//! Each line is one `{"type": ..., "data": {...}}` event. The source feeds the
//! channels in order, then closes both; it never fabricates a terminal event.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

use crate::channel::{plan_stream, PlanStreamChannels, PlanStreamSender};
use crate::config::ReplayConfig;
use crate::event::PlanStreamEvent;

/// A data line consisting of this marker ends the replay early.
pub const DONE_MARKER: &str = "[DONE]";

/// Starts replaying `reader` on a background task.
pub fn spawn_jsonl_replay<R>(reader: R, cfg: &ReplayConfig) -> (PlanStreamChannels, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, channels) = plan_stream(cfg.channel_capacity);
    let delay = Duration::from_millis(cfg.delay_ms);
    let handle = tokio::spawn(replay_lines(reader, tx, delay));
    (channels, handle)
}

async fn replay_lines<R>(reader: R, tx: PlanStreamSender, delay: Duration)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut line_no = 0usize;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "replay read failed");
                let err = anyhow::Error::new(e).context("stream read error");
                let _ = tx.errors.send(Some(err)).await;
                break;
            }
        };
        line_no += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == DONE_MARKER {
            tracing::debug!(line = line_no, "replay end marker");
            break;
        }

        let event = match serde_json::from_str::<PlanStreamEvent>(trimmed) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping undecodable replay line");
                continue;
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if tx.events.send(event).await.is_err() {
            tracing::debug!("consumer gone; stopping replay");
            break;
        }
    }
    // Dropping `tx` closes both channels.
}
