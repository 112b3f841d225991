//! Synchronization Engine
//!
//! Applies product change events to the index under the watermark rule.
//!
//! ## Apply Rule
//! For an event `e` on product `p` with current watermark `w`:
//! 1. If `e` is not a delete and carries no payload (or a payload for another id), it fails
//!    with `MalformedEvent` and `w` stays put, so a corrected redelivery can still apply.
//! 2. If `w` exists and `e.timestamp <= w`, the event is stale and dropped.
//! 3. Otherwise the index is mutated (upsert or delete) and only then `w = e.timestamp`.
//!
//! A storage failure in step 3 leaves `w` untouched; redelivering the same event repeats an
//! idempotent upsert/delete. The engine never retries on its own.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::stats::SyncStats;
use super::types::{ApplyOutcome, EventKind, ProductChangeEvent};
use crate::error::{Error, Result};
use crate::index::store::{IndexStore, WatermarkStore};
use crate::index::types::Product;

pub struct SyncEngine {
    index: Arc<dyn IndexStore>,
    watermarks: Arc<dyn WatermarkStore>,
    /// One mutex per product id with an apply in flight. Entries are dropped once unused.
    key_locks: DashMap<String, Arc<Mutex<()>>>,
    stats: Arc<SyncStats>,
}

impl SyncEngine {
    pub fn new(
        index: Arc<dyn IndexStore>,
        watermarks: Arc<dyn WatermarkStore>,
        stats: Arc<SyncStats>,
    ) -> Arc<Self> {
        Arc::new(Self {
            index,
            watermarks,
            key_locks: DashMap::new(),
            stats,
        })
    }

    pub fn stats(&self) -> &Arc<SyncStats> {
        &self.stats
    }

    pub async fn watermark(&self, product_id: &str) -> Result<Option<u64>> {
        self.watermarks.get(product_id).await
    }

    pub async fn apply(&self, event: &ProductChangeEvent) -> Result<ApplyOutcome> {
        let payload = match self.check_shape(event) {
            Ok(payload) => payload,
            Err(e) => {
                self.stats.record_malformed();
                tracing::warn!("Rejected event: {}", e);
                return Err(e);
            }
        };

        let lock = self.lock_for(&event.product_id);
        let result = {
            let _guard = lock.lock().await;
            self.apply_locked(event, payload).await
        };
        drop(lock);
        self.release_lock(&event.product_id);

        match &result {
            Ok(ApplyOutcome::Applied) => self.stats.record_applied(),
            Ok(ApplyOutcome::Stale { .. }) => self.stats.record_stale(),
            Err(Error::InvalidArgument(_)) => self.stats.record_rejected(),
            Err(_) => {}
        }
        result
    }

    /// Applies events one after another, collecting every outcome. A failed event does not
    /// stop the rest of the batch.
    pub async fn apply_batch(&self, events: &[ProductChangeEvent]) -> Vec<Result<ApplyOutcome>> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.apply(event).await);
        }
        outcomes
    }

    fn check_shape<'a>(&self, event: &'a ProductChangeEvent) -> Result<Option<&'a Product>> {
        if event.product_id.trim().is_empty() {
            return Err(Error::malformed("", "event has no product id"));
        }

        match event.kind {
            EventKind::Deleted => Ok(None),
            EventKind::Created | EventKind::Updated => {
                let product = event.payload.as_ref().ok_or_else(|| {
                    Error::malformed(
                        event.product_id.as_str(),
                        format!("{:?} event has no payload", event.kind),
                    )
                })?;
                if product.id != event.product_id {
                    return Err(Error::malformed(
                        event.product_id.as_str(),
                        format!("payload is for product '{}'", product.id),
                    ));
                }
                Ok(Some(product))
            }
        }
    }

    async fn apply_locked(
        &self,
        event: &ProductChangeEvent,
        payload: Option<&Product>,
    ) -> Result<ApplyOutcome> {
        let id = event.product_id.as_str();

        if let Some(watermark) = self.watermarks.get(id).await?
            && event.timestamp <= watermark
        {
            tracing::debug!(
                "Discarding stale {:?} for {} (ts {} <= watermark {})",
                event.kind,
                id,
                event.timestamp,
                watermark
            );
            return Ok(ApplyOutcome::Stale { watermark });
        }

        match payload {
            Some(product) => self.index.upsert(product.clone()).await?,
            None => {
                self.index.delete(id).await?;
            }
        }
        self.watermarks.set(id, event.timestamp).await?;

        tracing::debug!("Applied {:?} for {} at ts {}", event.kind, id, event.timestamp);
        Ok(ApplyOutcome::Applied)
    }

    fn lock_for(&self, product_id: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .entry(product_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the id's mutex if no other apply holds a handle to it.
    fn release_lock(&self, product_id: &str) {
        self.key_locks
            .remove_if(product_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
