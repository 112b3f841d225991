//! Sync HTTP Protocol
//!
//! The webhook the upstream messaging collaborator pushes change events to, and the
//! observability endpoints of the sync pipeline.

use serde::{Deserialize, Serialize};

use super::types::ApplyOutcome;

/// Queue an event for the consumer (asynchronous, at-least-once).
pub const ENDPOINT_EVENTS: &str = "/events";
/// Apply an event inline and report the outcome.
pub const ENDPOINT_EVENTS_APPLY: &str = "/events/apply";
pub const ENDPOINT_SYNC_STATS: &str = "/sync/stats";
pub const ENDPOINT_WATERMARK: &str = "/sync/watermark";

#[derive(Debug, Serialize, Deserialize)]
pub struct EnqueueResponse {
    pub accepted: bool,
    pub product_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub product_id: String,
    #[serde(flatten)]
    pub outcome: ApplyOutcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WatermarkResponse {
    pub product_id: String,
    pub watermark: Option<u64>,
}
