use async_trait::async_trait;
use orderpad_core::{Ack, OrderTransmitter, TransmitError};
use orderpad_order::OrderRecord;
use std::time::Duration;

/// Client for the collector script that appends each order to a sheet.
pub struct ScriptEndpointClient {
    endpoint_url: String,
    client: reqwest::Client,
}

impl ScriptEndpointClient {
    pub fn new(endpoint_url: impl Into<String>, timeout: Duration) -> Result<Self, TransmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransmitError::Request(e.to_string()))?;

        Ok(Self {
            endpoint_url: endpoint_url.into(),
            client,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl OrderTransmitter for ScriptEndpointClient {
    async fn submit(&self, record: &OrderRecord) -> Result<Ack, TransmitError> {
        let body = serde_json::to_vec(record).map_err(|e| TransmitError::Encoding(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransmitError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransmitError::Request(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint_url, "Collector accepted order");
        Ok(Ack(text))
    }
}
