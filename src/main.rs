use clap::Parser;
use commerce_cluster::config::NodeConfig;
use commerce_cluster::index::memory::{MemoryIndexStore, MemoryWatermarkStore};
use commerce_cluster::index::store::{IndexStore, WatermarkStore};
use commerce_cluster::registry::service::RegistryService;
use commerce_cluster::search::engine::QueryEngine;
use commerce_cluster::server::{AppServices, router};
use commerce_cluster::sync::consumer::EventConsumer;
use commerce_cluster::sync::engine::SyncEngine;
use commerce_cluster::sync::stats::SyncStats;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;
    tracing::info!("Starting node on {}", config.bind);

    // 1. Storage:
    let index: Arc<dyn IndexStore> = MemoryIndexStore::open();
    let watermarks: Arc<dyn WatermarkStore> = MemoryWatermarkStore::open();

    // 2. Core services:
    let registry = RegistryService::new();
    let stats = Arc::new(SyncStats::default());
    let sync = SyncEngine::new(index.clone(), watermarks.clone(), stats);
    let search = QueryEngine::new(index.clone(), config.search());

    // 3. Event consumer:
    let (events_tx, events_rx) = mpsc::channel(config.event_buffer);
    let consumer = EventConsumer::new(sync.clone(), config.consumer());
    let consumer_handle = consumer.start(events_rx);

    // 4. HTTP Router:
    let app = router(AppServices {
        registry,
        sync,
        search,
        events: events_tx,
    });

    // 5. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
        })
        .await?;

    // 6. Drain and close. The router owned the last event sender, so the consumer sees
    //    its input close and finishes whatever is queued.
    consumer_handle.join().await;
    index.close().await;
    watermarks.close().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
