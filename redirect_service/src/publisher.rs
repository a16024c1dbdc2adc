//! Click event publication, decoupled from the redirect path.
//!
//! Handlers hand events to [`ClickPublisher::publish`], which only enqueues.
//! A single background worker drains the queue and hands each event to a
//! [`ClickSink`] in queue order. Acknowledgements are awaited concurrently, up
//! to `max_in_flight` at once. The queue is bounded: once full, the oldest
//! queued events are overwritten and the worker logs how many it lost. Sink
//! failures are logged and dropped.

use futures::FutureExt;
use futures::future::BoxFuture;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord};
use shared::ClickEvent;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to serialize click event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Kafka error: {0}")]
    Kafka(#[from] KafkaError),
}

/// Resolves once the log acknowledged (or rejected) one event.
pub type Delivery = BoxFuture<'static, Result<(), PublishError>>;

/// Destination for click events.
pub trait ClickSink: Send + Sync {
    /// Hands the event to the log client. Calls are made in queue order, so a
    /// client that orders by enqueue keeps per-code ordering.
    fn enqueue(&self, event: &ClickEvent) -> Delivery;
}

pub struct KafkaClickSink {
    producer: FutureProducer,
    topic: String,
}

impl KafkaClickSink {
    /// Delivery is bounded by the producer's `message.timeout.ms`.
    pub fn new(producer: FutureProducer, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }
}

impl ClickSink for KafkaClickSink {
    fn enqueue(&self, event: &ClickEvent) -> Delivery {
        let payload = match event.to_json() {
            Ok(payload) => payload,
            Err(e) => return async move { Err(PublishError::Serialize(e)) }.boxed(),
        };

        let record = FutureRecord::to(&self.topic)
            .key(event.partition_key())
            .payload(&payload);

        match self.producer.send_result(record) {
            Ok(delivery) => async move {
                match delivery.await {
                    Ok(Ok(_)) => Ok(()),
                    Ok(Err((e, _))) => Err(PublishError::Kafka(e)),
                    Err(_) => Err(PublishError::Kafka(KafkaError::Canceled)),
                }
            }
            .boxed(),
            Err((e, _)) => async move { Err(PublishError::Kafka(e)) }.boxed(),
        }
    }
}

/// Cloneable, non-blocking handle onto the publish queue.
#[derive(Clone)]
pub struct ClickPublisher {
    tx: broadcast::Sender<ClickEvent>,
    capacity: usize,
}

impl ClickPublisher {
    /// Starts the worker. It stops once every handle is dropped, the queue has
    /// been drained and every pending delivery has settled.
    ///
    /// The queue holds `capacity` rounded up to the next power of two.
    pub fn spawn(
        sink: Arc<dyn ClickSink>,
        capacity: usize,
        max_in_flight: usize,
    ) -> (Self, JoinHandle<()>) {
        let capacity = effective_capacity(capacity);
        let (tx, rx) = broadcast::channel(capacity);
        let worker = tokio::spawn(run_worker(rx, sink, max_in_flight.max(1)));
        (Self { tx, capacity }, worker)
    }

    /// Enqueues without waiting. Never fails from the caller's point of view.
    pub fn publish(&self, event: ClickEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!(
                short_code = %e.0.short_code,
                "Click worker is not running, dropping event"
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.tx.receiver_count() > 0
    }

    /// Events the queue holds before the oldest are overwritten.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

pub fn effective_capacity(requested: usize) -> usize {
    requested.max(1).next_power_of_two()
}

async fn run_worker(
    mut rx: broadcast::Receiver<ClickEvent>,
    sink: Arc<dyn ClickSink>,
    max_in_flight: usize,
) {
    info!(max_in_flight, "Click worker started");

    let permits = Arc::new(Semaphore::new(max_in_flight));
    let mut deliveries = JoinSet::new();

    loop {
        // Wait for a free slot before taking from the queue, so a stalled log
        // leaves events in the queue where overflow drops the oldest.
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        match rx.recv().await {
            Ok(event) => {
                let delivery = sink.enqueue(&event);
                deliveries.spawn(async move {
                    let _permit = permit;
                    match delivery.await {
                        Ok(()) => debug!(short_code = %event.short_code, "Published click event"),
                        Err(e) => warn!(
                            short_code = %event.short_code,
                            "Failed to publish click event: {}", e
                        ),
                    }
                });
            }
            Err(RecvError::Lagged(dropped)) => {
                warn!(dropped, "Click queue full, oldest events dropped");
            }
            Err(RecvError::Closed) => break,
        }

        while deliveries.try_join_next().is_some() {}
    }

    while deliveries.join_next().await.is_some() {}

    info!("Click worker stopped");
}
