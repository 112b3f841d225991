//! Service Registry Module
//!
//! Keeps the mapping from service name to the instance currently serving it. The gateway
//! resolves every routed request through `RegistryService::lookup`, so the store is tuned
//! for a read-mostly workload.
//!
//! ## Core Mechanisms
//! - **Last Write Wins**: Re-registering a name replaces the previous instance unconditionally.
//! - **Snapshot Reads**: `list_all` hands out an owned copy; callers can never reach the live map.
//! - **No Implicit Expiry**: Entries live until deregistered or explicitly pruned.
//!
//! ## Submodules
//! - **`store`**: The lock-guarded map itself.
//! - **`service`**: Validation and the public register/lookup/list API.
//! - **`client`**: HTTP client used by service instances to self-register.
//! - **`handlers`** / **`protocol`**: The HTTP surface consumed by the gateway.

pub mod client;
pub mod handlers;
pub mod protocol;
pub mod service;
pub mod store;
pub mod types;
