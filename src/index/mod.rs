//! Product Index Module
//!
//! The queryable, index-side projection of the product catalogue plus the per-product
//! watermarks the sync engine uses to order change events.
//!
//! Both stores sit behind traits (`IndexStore`, `WatermarkStore`) so a durable backend can
//! replace the in-memory one without touching the sync or search layers. Stores are
//! constructed explicitly, shared by `Arc`, and closed explicitly; a closed store answers
//! every call with `StorageFailure`.

pub mod memory;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
