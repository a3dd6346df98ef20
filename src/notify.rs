//! Best-effort fan-out of events to player endpoints.
//!
//! Submission never blocks the calling transition: each delivery runs in its
//! own task, with overall concurrency bounded by a shared semaphore. A failed
//! delivery is logged and swallowed; it affects neither the other recipients
//! nor the state transition that produced the event. Ordering of events to
//! the same recipient is not guaranteed under load; that is an accepted
//! weakness of this design.

use crate::protocol::Event;
use crate::transport::EventTransport;
use crate::types::PlayerId;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Delivery address snapshot taken while the game lock is held.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub player_id: PlayerId,
    pub endpoint: String,
}

#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn EventTransport>,
    permits: Arc<Semaphore>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn EventTransport>, concurrency: usize) -> Self {
        Self {
            transport,
            permits: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Enqueue delivery of `event` to every recipient. Returns immediately.
    pub fn broadcast(&self, event: Event, recipients: Vec<Recipient>) {
        let event = Arc::new(event);
        for recipient in recipients {
            let transport = Arc::clone(&self.transport);
            let permits = Arc::clone(&self.permits);
            let event = Arc::clone(&event);
            tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                if let Err(e) = transport.deliver(&recipient.endpoint, &event).await {
                    tracing::warn!(
                        player_id = %recipient.player_id,
                        endpoint = %recipient.endpoint,
                        error = %e,
                        "failed to notify player"
                    );
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{TransportError, TransportResult};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct RecordingTransport {
        tx: mpsc::UnboundedSender<(String, Event)>,
        fail_endpoint: Option<String>,
    }

    #[async_trait]
    impl EventTransport for RecordingTransport {
        async fn deliver(&self, endpoint: &str, event: &Event) -> TransportResult {
            if self.fail_endpoint.as_deref() == Some(endpoint) {
                return Err(TransportError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            self.tx
                .send((endpoint.to_string(), event.clone()))
                .expect("receiver alive");
            Ok(())
        }
    }

    fn recipient(id: &str) -> Recipient {
        Recipient {
            player_id: id.to_string(),
            endpoint: format!("{id}.example:5000"),
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_every_recipient() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = Notifier::new(
            Arc::new(RecordingTransport {
                tx,
                fail_endpoint: None,
            }),
            8,
        );

        notifier.broadcast(
            Event::NewGame {},
            vec![recipient("p1"), recipient("p2"), recipient("p3")],
        );

        let mut seen = Vec::new();
        for _ in 0..3 {
            let (endpoint, event) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("delivery within a second")
                .expect("channel open");
            assert_eq!(event, Event::NewGame {});
            seen.push(endpoint);
        }
        seen.sort();
        assert_eq!(
            seen,
            vec!["p1.example:5000", "p2.example:5000", "p3.example:5000"]
        );
    }

    #[tokio::test]
    async fn one_failed_delivery_does_not_affect_the_others() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = Notifier::new(
            Arc::new(RecordingTransport {
                tx,
                fail_endpoint: Some("p2.example:5000".to_string()),
            }),
            8,
        );

        notifier.broadcast(
            Event::NewGame {},
            vec![recipient("p1"), recipient("p2"), recipient("p3")],
        );

        let mut delivered = Vec::new();
        for _ in 0..2 {
            let (endpoint, _) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("delivery within a second")
                .expect("channel open");
            delivered.push(endpoint);
        }
        delivered.sort();
        assert_eq!(delivered, vec!["p1.example:5000", "p3.example:5000"]);

        // No third delivery arrives for the failed endpoint
        assert!(
            tokio::time::timeout(Duration::from_millis(100), rx.recv())
                .await
                .is_err()
        );
    }
}
