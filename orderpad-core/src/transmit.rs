use async_trait::async_trait;
use orderpad_order::OrderRecord;

/// Remote collector that receives each submitted order
#[async_trait]
pub trait OrderTransmitter: Send + Sync {
    /// Send the order; the collector's reply text comes back as the acknowledgment.
    async fn submit(&self, record: &OrderRecord) -> Result<Ack, TransmitError>;
}

/// Acknowledgment text returned by the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack(pub String);

impl Ack {
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransmitError {
    #[error("Collector request failed: {0}")]
    Request(String),

    #[error("Collector responded with HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    #[error("Order could not be encoded: {0}")]
    Encoding(String),
}
