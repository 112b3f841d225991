//! HTTP Router
//!
//! Wires the registry, sync and search handlers into one Axum router. Shared components are
//! handed to handlers through `Extension` layers.

use axum::{
    Extension, Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::registry::handlers as registry_handlers;
use crate::registry::protocol::{
    ENDPOINT_LOOKUP, ENDPOINT_PRUNE, ENDPOINT_REGISTER, ENDPOINT_SERVICES,
};
use crate::registry::service::RegistryService;
use crate::search::engine::QueryEngine;
use crate::search::handlers as search_handlers;
use crate::sync::engine::SyncEngine;
use crate::sync::handlers as sync_handlers;
use crate::sync::protocol::{
    ENDPOINT_EVENTS, ENDPOINT_EVENTS_APPLY, ENDPOINT_SYNC_STATS, ENDPOINT_WATERMARK,
};
use crate::sync::types::ProductChangeEvent;

pub const ENDPOINT_SEARCH: &str = "/search";
pub const ENDPOINT_PRODUCTS: &str = "/products";
pub const ENDPOINT_HEALTH: &str = "/health";

/// Everything the HTTP layer needs. Built once in `main` and cloned into the router.
#[derive(Clone)]
pub struct AppServices {
    pub registry: Arc<RegistryService>,
    pub sync: Arc<SyncEngine>,
    pub search: Arc<QueryEngine>,
    pub events: mpsc::Sender<ProductChangeEvent>,
}

pub fn router(services: AppServices) -> Router {
    Router::new()
        .route(ENDPOINT_HEALTH, get(|| async { "ok" }))
        .route(ENDPOINT_REGISTER, post(registry_handlers::handle_register))
        .route(
            &format!("{}/:name", ENDPOINT_LOOKUP),
            get(registry_handlers::handle_lookup),
        )
        .route(ENDPOINT_SERVICES, get(registry_handlers::handle_list_services))
        .route(
            &format!("{}/:name", ENDPOINT_SERVICES),
            delete(registry_handlers::handle_deregister),
        )
        .route(
            &format!("{}/:name/status", ENDPOINT_SERVICES),
            put(registry_handlers::handle_set_status),
        )
        .route(ENDPOINT_PRUNE, post(registry_handlers::handle_prune))
        .route(ENDPOINT_EVENTS, post(sync_handlers::handle_enqueue_event))
        .route(ENDPOINT_EVENTS_APPLY, post(sync_handlers::handle_apply_event))
        .route(ENDPOINT_SYNC_STATS, get(sync_handlers::handle_sync_stats))
        .route(
            &format!("{}/:id", ENDPOINT_WATERMARK),
            get(sync_handlers::handle_watermark),
        )
        .route(ENDPOINT_SEARCH, get(search_handlers::handle_search))
        .route(
            &format!("{}/:id", ENDPOINT_PRODUCTS),
            get(search_handlers::handle_get_product),
        )
        .layer(Extension(services.registry))
        .layer(Extension(services.sync))
        .layer(Extension(services.search))
        .layer(Extension(services.events))
}
