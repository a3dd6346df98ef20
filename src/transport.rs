use crate::protocol::Event;
use async_trait::async_trait;

/// Result type for delivery operations
pub type TransportResult = Result<(), TransportError>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Outbound seam to whatever carries events to a player's endpoint. The core
/// never depends on the wire format behind this trait.
#[async_trait]
pub trait EventTransport: Send + Sync {
    async fn deliver(&self, endpoint: &str, event: &Event) -> TransportResult;
}

/// Production transport: POSTs each event to `http://{endpoint}/notify`.
pub struct HttpEventTransport {
    client: reqwest::Client,
}

impl HttpEventTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventTransport for HttpEventTransport {
    async fn deliver(&self, endpoint: &str, event: &Event) -> TransportResult {
        let url = format!("http://{endpoint}/notify");
        let response = self.client.post(&url).json(event).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(())
    }
}
