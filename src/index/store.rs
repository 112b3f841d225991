use async_trait::async_trait;

use super::types::Product;
use crate::error::Result;
use crate::search::types::{SearchQuery, SearchResult};

/// Keyed document store backing the search index.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Replaces any document with the same id. Rejects negative price or stock.
    async fn upsert(&self, product: Product) -> Result<()>;

    /// Removes the document if present. Returns whether anything was removed;
    /// deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<bool>;

    async fn get(&self, id: &str) -> Result<Option<Product>>;

    /// Evaluates an already-validated query: match, filter, sort, paginate.
    async fn query(&self, query: &SearchQuery) -> Result<SearchResult>;

    async fn len(&self) -> Result<usize>;

    async fn close(&self);
}

/// Last applied event timestamp per product id.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    async fn get(&self, product_id: &str) -> Result<Option<u64>>;

    async fn set(&self, product_id: &str, timestamp: u64) -> Result<()>;

    async fn close(&self);
}
