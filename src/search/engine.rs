use std::sync::Arc;

use super::types::{SearchQuery, SearchResult};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::index::store::IndexStore;
use crate::index::types::Product;

/// Serves search requests against the product index.
pub struct QueryEngine {
    index: Arc<dyn IndexStore>,
    config: SearchConfig,
}

impl QueryEngine {
    pub fn new(index: Arc<dyn IndexStore>, config: SearchConfig) -> Arc<Self> {
        Arc::new(Self { index, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn validate(&self, query: &SearchQuery) -> Result<()> {
        query.validate(self.config.max_page_size)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        self.validate(query)?;

        let result = self.index.query(query).await?;
        tracing::debug!(
            "Search {:?} page {} -> {} of {} match(es)",
            query.query,
            query.page,
            result.products.len(),
            result.total
        );
        Ok(result)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.index
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found("product", id))
    }
}
