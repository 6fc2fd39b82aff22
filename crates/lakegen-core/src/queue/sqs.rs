//! Amazon SQS queue backend.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use tracing::{debug, info};

use super::{QueueBackend, QueueDelivery};
use crate::error::QueueError;
use crate::{Error, Result};

/// SQS queue backend
pub struct SqsBackend {
    client: Client,
    queue_url: String,
    wait_time_secs: i32,
}

impl SqsBackend {
    /// Build a client from environment credentials for one queue URL.
    /// `wait_time_secs` enables long polling on receive.
    pub async fn from_env(queue_url: String, wait_time_secs: i32) -> Self {
        let shared_config = aws_config::load_from_env().await;
        let client = Client::new(&shared_config);
        info!("Created SQS backend for queue: {}", queue_url);
        Self {
            client,
            queue_url,
            wait_time_secs,
        }
    }
}

#[async_trait]
impl QueueBackend for SqsBackend {
    async fn receive(&self) -> Result<Option<QueueDelivery>> {
        debug!("SQS RECEIVE: {}", self.queue_url);

        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(self.wait_time_secs)
            .send()
            .await
            .map_err(|e| Error::Queue(QueueError::Receive(e.to_string())))?;

        let Some(message) = output.messages().first() else {
            return Ok(None);
        };
        let body = message
            .body()
            .ok_or_else(|| {
                Error::Queue(QueueError::MalformedDelivery("message has no body".to_string()))
            })?
            .to_string();
        let receipt = message
            .receipt_handle()
            .ok_or_else(|| {
                Error::Queue(QueueError::MalformedDelivery(
                    "message has no receipt handle".to_string(),
                ))
            })?
            .to_string();

        Ok(Some(QueueDelivery { body, receipt }))
    }

    async fn delete(&self, receipt: &str) -> Result<()> {
        debug!("SQS DELETE: {}", self.queue_url);

        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt)
            .send()
            .await
            .map_err(|e| Error::Queue(QueueError::Delete(e.to_string())))?;

        Ok(())
    }
}
