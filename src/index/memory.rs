use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::store::{IndexStore, WatermarkStore};
use super::types::Product;
use crate::error::{Error, Result};
use crate::search::matcher;
use crate::search::types::{SearchQuery, SearchResult};

/// In-memory `IndexStore`.
///
/// Documents live in a `DashMap`, so writers to different ids only contend when they hash
/// to the same shard. Queries clone matching documents shard by shard: a concurrent upsert
/// is either seen or not, but never half-seen.
pub struct MemoryIndexStore {
    documents: DashMap<String, Product>,
    open: AtomicBool,
}

impl MemoryIndexStore {
    pub fn open() -> Arc<Self> {
        tracing::info!("Opened in-memory product index");
        Arc::new(Self {
            documents: DashMap::new(),
            open: AtomicBool::new(true),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::storage("product index is closed"))
        }
    }
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn upsert(&self, product: Product) -> Result<()> {
        self.ensure_open()?;
        product.validate()?;
        tracing::debug!("Indexing product {}", product.id);
        self.documents.insert(product.id.clone(), product);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.ensure_open()?;
        let removed = self.documents.remove(id).is_some();
        tracing::debug!("Delete product {} (present: {})", id, removed);
        Ok(removed)
    }

    async fn get(&self, id: &str) -> Result<Option<Product>> {
        self.ensure_open()?;
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    async fn query(&self, query: &SearchQuery) -> Result<SearchResult> {
        self.ensure_open()?;
        // The page-size cap is a serving policy; the store only refuses empty or zero pages.
        query.validate(usize::MAX)?;

        let mut matches: Vec<Product> = self
            .documents
            .iter()
            .filter(|entry| matcher::matches(entry.value(), query))
            .map(|entry| entry.value().clone())
            .collect();

        matcher::sort(&mut matches, &query.sort);
        Ok(matcher::paginate(matches, query.page, query.limit))
    }

    async fn len(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.documents.len())
    }

    async fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            tracing::info!("Closed product index ({} documents)", self.documents.len());
        }
    }
}

/// In-memory `WatermarkStore`.
pub struct MemoryWatermarkStore {
    watermarks: DashMap<String, u64>,
    open: AtomicBool,
}

impl MemoryWatermarkStore {
    pub fn open() -> Arc<Self> {
        Arc::new(Self {
            watermarks: DashMap::new(),
            open: AtomicBool::new(true),
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::storage("watermark store is closed"))
        }
    }
}

#[async_trait]
impl WatermarkStore for MemoryWatermarkStore {
    async fn get(&self, product_id: &str) -> Result<Option<u64>> {
        self.ensure_open()?;
        Ok(self.watermarks.get(product_id).map(|entry| *entry.value()))
    }

    async fn set(&self, product_id: &str, timestamp: u64) -> Result<()> {
        self.ensure_open()?;
        self.watermarks.insert(product_id.to_string(), timestamp);
        Ok(())
    }

    async fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            tracing::info!("Closed watermark store ({} keys)", self.watermarks.len());
        }
    }
}
