use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::index::types::Product;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
}

/// One upstream product mutation.
///
/// `timestamp` is a per-product logical clock: only its order relative to other events for
/// the same `product_id` matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductChangeEvent {
    pub kind: EventKind,
    pub product_id: String,
    /// Full product state after the change. Absent for deletes.
    #[serde(default)]
    pub payload: Option<Product>,
    pub timestamp: u64,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ProductChangeEvent {
    pub fn created(product: Product, timestamp: u64) -> Self {
        Self::with_payload(EventKind::Created, product, timestamp)
    }

    pub fn updated(product: Product, timestamp: u64) -> Self {
        Self::with_payload(EventKind::Updated, product, timestamp)
    }

    pub fn deleted(product_id: impl Into<String>, timestamp: u64) -> Self {
        Self {
            kind: EventKind::Deleted,
            product_id: product_id.into(),
            payload: None,
            timestamp,
            metadata: HashMap::new(),
        }
    }

    fn with_payload(kind: EventKind, product: Product, timestamp: u64) -> Self {
        Self {
            kind,
            product_id: product.id.clone(),
            payload: Some(product),
            timestamp,
            metadata: HashMap::new(),
        }
    }
}

/// What happened to an event that did not fail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ApplyOutcome {
    /// The index was mutated and the watermark advanced to the event's timestamp.
    Applied,
    /// The event was at or below the watermark and was discarded.
    Stale { watermark: u64 },
}
