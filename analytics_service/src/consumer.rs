use crate::store::{ClickStore, ClickStoreError};
use rdkafka::Message;
use rdkafka::consumer::StreamConsumer;
use shared::ClickEvent;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to decode click event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to store click event: {0}")]
    Store(#[from] ClickStoreError),
}

/// Decodes one record from the click topic and stores it.
pub async fn ingest(store: &dyn ClickStore, payload: &[u8]) -> Result<ClickEvent, IngestError> {
    let event = ClickEvent::from_json(payload)?;
    store.record(&event).await?;
    Ok(event)
}

/// Runs until the consumer stream ends. Read errors back off for a second;
/// undecodable or unstorable records are skipped. Offsets are committed by the
/// client in the background, so a restart resumes from the last commit.
pub async fn consume_clicks(consumer: StreamConsumer, store: Arc<dyn ClickStore>) {
    info!("Starting Kafka consumer...");

    let mut message_stream = consumer.stream();
    while let Some(result) = message_stream.next().await {
        let message = match result {
            Ok(message) => message.detach(),
            Err(e) => {
                error!("Error reading message: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        let Some(payload) = message.payload() else {
            warn!(
                partition = message.partition(),
                offset = message.offset(),
                "Skipping message without payload"
            );
            continue;
        };

        match ingest(store.as_ref(), payload).await {
            Ok(event) => info!(
                short_code = %event.short_code,
                partition = message.partition(),
                offset = message.offset(),
                "Processed click event"
            ),
            Err(e) => warn!(
                partition = message.partition(),
                offset = message.offset(),
                "Skipping click event: {}", e
            ),
        }
    }

    warn!("Kafka message stream ended");
}
