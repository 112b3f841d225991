//! Index Synchronization Module
//!
//! Keeps the product index eventually consistent with the upstream catalogue by applying
//! product change events delivered at-least-once, possibly duplicated and out of order.
//!
//! ## Core Mechanisms
//! - **Watermarks**: Every product id carries the timestamp of the last event applied to it.
//!   An event is applied only when its timestamp is strictly greater; anything else is stale
//!   and dropped. This is the only deduplication in the pipeline.
//! - **Tombstones**: Deletes advance the watermark too, so a late update cannot resurrect a
//!   deleted product.
//! - **Per-Key Serialization**: Check-and-apply for one product id runs under that id's lock;
//!   distinct ids proceed in parallel.
//! - **Lanes**: The consumer hashes product ids onto sequential lanes, so two events for the
//!   same id are never in flight together, and retries storage failures with backoff.
//!
//! ## Submodules
//! - **`engine`**: `SyncEngine`, the watermark apply rule.
//! - **`consumer`**: `EventConsumer`, the lane-based worker pool fed by a channel.
//! - **`stats`**: Counters for received/applied/stale/failed events.
//! - **`handlers`** / **`protocol`**: Webhook and stats endpoints.

pub mod consumer;
pub mod engine;
pub mod handlers;
pub mod protocol;
pub mod stats;
pub mod types;
