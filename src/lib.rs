//! Commerce Cluster Core Library
//!
//! The two subsystems of the commerce platform that keep shared state consistent across
//! services. Everything else in the platform (page rendering, identity persistence,
//! gateway routing mechanics) consumes these through their Rust or HTTP APIs.
//!
//! ## Architecture Modules
//! - **`registry`**: Service discovery for the gateway. A read-mostly name -> instance map
//!   with last-write-wins registration and snapshot listing.
//! - **`index`**: The product index and per-product watermark stores, behind traits with an
//!   in-memory implementation and explicit open/close lifecycle.
//! - **`sync`**: The synchronization pipeline. Applies upstream product change events to
//!   the index idempotently, tolerating duplicate and out-of-order delivery.
//! - **`search`**: The query engine. Free-text matching, structured filters, stable sorting
//!   and pagination over the index.
//! - **`server`**: The Axum router exposing all of the above over HTTP.

pub mod config;
pub mod error;
pub mod index;
pub mod registry;
pub mod search;
pub mod server;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;
