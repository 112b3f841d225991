//! Event Consumer
//!
//! Drains a channel of product change events into the `SyncEngine`.
//!
//! ## Lanes
//! A dispatcher hashes each event's product id onto one of `lanes` workers. Each lane applies
//! its events strictly one at a time, so events for the same product are never applied
//! concurrently, while different products spread across lanes and run in parallel.
//!
//! ## Retries
//! The consumer plays the transport's part of the at-least-once contract: a `StorageFailure`
//! is redelivered to the engine up to `apply_attempts` times with exponential backoff and
//! jitter. Every other error is definitive and logged.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::engine::SyncEngine;
use super::types::{ApplyOutcome, ProductChangeEvent};
use crate::config::ConsumerConfig;
use crate::error::{Error, Result};

pub struct EventConsumer {
    engine: Arc<SyncEngine>,
    config: ConsumerConfig,
}

/// Join handles of a running consumer. The consumer stops once every sender of its input
/// channel is dropped and the lanes have drained.
pub struct ConsumerHandle {
    dispatcher: JoinHandle<()>,
    lanes: Vec<JoinHandle<()>>,
}

impl ConsumerHandle {
    pub async fn join(self) {
        if let Err(e) = self.dispatcher.await {
            tracing::error!("Event dispatcher panicked: {}", e);
        }
        for (lane, handle) in self.lanes.into_iter().enumerate() {
            if let Err(e) = handle.await {
                tracing::error!("Consumer lane {} panicked: {}", lane, e);
            }
        }
        tracing::info!("Event consumer stopped");
    }
}

/// Lane a product id is pinned to.
pub fn lane_for(product_id: &str, lanes: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    product_id.hash(&mut hasher);
    (hasher.finish() % lanes.max(1) as u64) as usize
}

impl EventConsumer {
    pub fn new(engine: Arc<SyncEngine>, config: ConsumerConfig) -> Arc<Self> {
        Arc::new(Self { engine, config })
    }

    /// Spawns the dispatcher and lane workers and returns immediately.
    pub fn start(self: Arc<Self>, mut input: mpsc::Receiver<ProductChangeEvent>) -> ConsumerHandle {
        let lane_count = self.config.lanes.max(1);
        tracing::info!("Starting event consumer with {} lanes", lane_count);

        let mut senders = Vec::with_capacity(lane_count);
        let mut lanes = Vec::with_capacity(lane_count);
        for lane_id in 0..lane_count {
            let (tx, rx) = mpsc::channel(self.config.lane_buffer.max(1));
            senders.push(tx);
            let consumer = self.clone();
            lanes.push(tokio::spawn(async move {
                consumer.lane_loop(lane_id, rx).await;
            }));
        }

        let stats = self.engine.stats().clone();
        let dispatcher = tokio::spawn(async move {
            while let Some(event) = input.recv().await {
                stats.record_received();
                let lane = lane_for(&event.product_id, lane_count);
                if senders[lane].send(event).await.is_err() {
                    tracing::error!("Consumer lane {} is gone, dropping event", lane);
                }
            }
            tracing::info!("Event input closed, draining lanes");
        });

        ConsumerHandle { dispatcher, lanes }
    }

    async fn lane_loop(&self, lane_id: usize, mut rx: mpsc::Receiver<ProductChangeEvent>) {
        tracing::debug!("Consumer lane {} started", lane_id);

        while let Some(event) = rx.recv().await {
            match self.apply_with_retry(&event).await {
                Ok(ApplyOutcome::Applied) => {}
                Ok(ApplyOutcome::Stale { watermark }) => tracing::debug!(
                    "Lane {} dropped stale event for {} (ts {}, watermark {})",
                    lane_id,
                    event.product_id,
                    event.timestamp,
                    watermark
                ),
                Err(e) => tracing::error!(
                    "Lane {} failed {:?} event for {} at ts {}: {}",
                    lane_id,
                    event.kind,
                    event.product_id,
                    event.timestamp,
                    e
                ),
            }
        }

        tracing::debug!("Consumer lane {} stopped", lane_id);
    }

    pub async fn apply_with_retry(&self, event: &ProductChangeEvent) -> Result<ApplyOutcome> {
        let attempts = self.config.apply_attempts.max(1);
        let mut delay_ms = self.config.initial_backoff_ms;

        for attempt in 0..attempts {
            match self.engine.apply(event).await {
                Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                    self.engine.stats().record_retried();
                    tracing::warn!(
                        "Apply for {} failed (attempt {}/{}): {}",
                        event.product_id,
                        attempt + 1,
                        attempts,
                        e
                    );
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(self.config.max_backoff_ms);
                }
                Err(e) => {
                    if e.is_retryable() {
                        self.engine.stats().record_failed();
                    }
                    return Err(e);
                }
                Ok(outcome) => return Ok(outcome),
            }
        }

        Err(Error::storage("retry attempts exhausted"))
    }
}
