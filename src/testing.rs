//! Shared fixtures for unit tests.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::{ConsumerConfig, SearchConfig};
use crate::index::memory::{MemoryIndexStore, MemoryWatermarkStore};
use crate::index::types::{Product, ProductStatus};
use crate::registry::service::RegistryService;
use crate::search::engine::QueryEngine;
use crate::server::{AppServices, router};
use crate::sync::consumer::EventConsumer;
use crate::sync::engine::SyncEngine;
use crate::sync::stats::SyncStats;

pub fn product(id: &str, name: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price,
        sku: format!("SKU-{}", id),
        category_id: None,
        status: ProductStatus::Active,
        stock: 10,
        active: true,
        created_at: 0,
        updated_at: 0,
    }
}

pub struct TestNode {
    pub addr: SocketAddr,
    pub services: AppServices,
    pub index: Arc<MemoryIndexStore>,
}

impl TestNode {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Full node (stores, engines, consumer, router) served on an ephemeral port.
pub async fn spawn_node() -> TestNode {
    let index = MemoryIndexStore::open();
    let sync = SyncEngine::new(
        index.clone(),
        MemoryWatermarkStore::open(),
        Arc::new(SyncStats::default()),
    );
    let search = QueryEngine::new(index.clone(), SearchConfig::default());

    let (events_tx, events_rx) = mpsc::channel(64);
    // Lanes run detached; they stop when the router's sender is dropped.
    EventConsumer::new(
        sync.clone(),
        ConsumerConfig {
            initial_backoff_ms: 5,
            max_backoff_ms: 20,
            ..ConsumerConfig::default()
        },
    )
    .start(events_rx);

    let services = AppServices {
        registry: RegistryService::new(),
        sync,
        search,
        events: events_tx,
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(services.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestNode {
        addr,
        services,
        index,
    }
}
