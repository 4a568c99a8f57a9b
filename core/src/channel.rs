//! The two one-directional channels a plan stream is consumed from.

use tokio::sync::mpsc;

use crate::event::PlanStreamEvent;

/// Fatal errors from the event source. `None` is an "ended without error" signal.
pub type TransportSignal = Option<anyhow::Error>;

/// Producer half, held by an event source.
#[derive(Debug, Clone)]
pub struct PlanStreamSender {
    pub events: mpsc::Sender<PlanStreamEvent>,
    pub errors: mpsc::Sender<TransportSignal>,
}

/// Consumer half, owned by the active renderer loop.
#[derive(Debug)]
pub struct PlanStreamChannels {
    pub events: mpsc::Receiver<PlanStreamEvent>,
    pub errors: mpsc::Receiver<TransportSignal>,
}

/// The next thing that happened on either channel.
#[derive(Debug)]
pub enum StreamSignal {
    Event(PlanStreamEvent),
    /// The event channel closed.
    EventsClosed,
    Transport(anyhow::Error),
    /// The error channel closed or yielded `None`.
    ErrorsEnded,
}

/// Creates a connected pair. The error channel holds a single pending error.
pub fn plan_stream(event_capacity: usize) -> (PlanStreamSender, PlanStreamChannels) {
    let (events_tx, events_rx) = mpsc::channel(event_capacity.max(1));
    let (errors_tx, errors_rx) = mpsc::channel(1);
    (
        PlanStreamSender {
            events: events_tx,
            errors: errors_tx,
        },
        PlanStreamChannels {
            events: events_rx,
            errors: errors_rx,
        },
    )
}

impl PlanStreamChannels {
    /// Waits for whichever channel is ready first.
    ///
    /// Buffered events are always delivered before a closure or error on the
    /// other channel. When the event channel closes, an error already queued
    /// by the source is reported instead of the bare closure. Cancel-safe.
    pub async fn next_signal(&mut self) -> StreamSignal {
        tokio::select! {
            biased;
            event = self.events.recv() => match event {
                Some(event) => StreamSignal::Event(event),
                None => match self.errors.try_recv() {
                    Ok(Some(err)) => StreamSignal::Transport(err),
                    _ => StreamSignal::EventsClosed,
                },
            },
            signal = self.errors.recv() => match signal {
                Some(Some(err)) => StreamSignal::Transport(err),
                Some(None) | None => StreamSignal::ErrorsEnded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn buffered_events_come_before_closure() {
        let (tx, mut rx) = plan_stream(4);
        tx.events
            .send(PlanStreamEvent::new("progress", json!({"progress": 10})))
            .await
            .expect("send");
        tx.errors.send(None).await.expect("send");
        drop(tx);

        assert!(matches!(rx.next_signal().await, StreamSignal::Event(_)));
        assert!(matches!(rx.next_signal().await, StreamSignal::EventsClosed));
    }

    #[tokio::test]
    async fn queued_error_wins_over_event_closure() {
        let (tx, mut rx) = plan_stream(4);
        tx.errors
            .send(Some(anyhow::anyhow!("connection reset")))
            .await
            .expect("send");
        drop(tx);

        match rx.next_signal().await {
            StreamSignal::Transport(err) => assert_eq!(err.to_string(), "connection reset"),
            other => panic!("unexpected signal: {other:?}"),
        }
    }

    #[test]
    fn idle_stream_stays_pending_until_an_event_arrives() {
        let (tx, mut rx) = plan_stream(4);
        let mut next = tokio_test::task::spawn(rx.next_signal());
        tokio_test::assert_pending!(next.poll());

        tx.events
            .try_send(PlanStreamEvent::new("thinking", json!({"content": "hm"})))
            .expect("send");
        assert!(next.is_woken());
        match tokio_test::assert_ready!(next.poll()) {
            StreamSignal::Event(event) => assert_eq!(event.event_type, "thinking"),
            other => panic!("unexpected signal: {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_event_channel_is_reported() {
        let (tx, mut rx) = plan_stream(4);
        drop(tx);
        assert!(matches!(rx.next_signal().await, StreamSignal::EventsClosed));
    }
}
