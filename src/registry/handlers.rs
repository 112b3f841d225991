use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json, extract::Path};
use std::sync::Arc;

use super::protocol::*;
use super::service::RegistryService;
use super::types::ServiceInstance;
use crate::error::{Error, Result};

pub async fn handle_register(
    Extension(registry): Extension<Arc<RegistryService>>,
    body: std::result::Result<Json<ServiceInstance>, JsonRejection>,
) -> Result<Json<RegisterResponse>> {
    let Json(instance) =
        body.map_err(|e| Error::invalid(format!("missing or malformed instance: {}", e)))?;
    let instance = registry.register(instance)?;
    Ok(Json(RegisterResponse { instance }))
}

pub async fn handle_lookup(
    Extension(registry): Extension<Arc<RegistryService>>,
    Path(name): Path<String>,
) -> Result<Json<ServiceInstance>> {
    registry.lookup(&name).map(Json)
}

pub async fn handle_list_services(
    Extension(registry): Extension<Arc<RegistryService>>,
) -> Json<ListServicesResponse> {
    let services = registry.list_all();
    Json(ListServicesResponse {
        count: services.len(),
        services,
    })
}

pub async fn handle_deregister(
    Extension(registry): Extension<Arc<RegistryService>>,
    Path(name): Path<String>,
) -> Json<DeregisterResponse> {
    let removed = registry.deregister(&name);
    Json(DeregisterResponse { name, removed })
}

pub async fn handle_set_status(
    Extension(registry): Extension<Arc<RegistryService>>,
    Path(name): Path<String>,
    body: std::result::Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<ServiceInstance>> {
    let Json(req) = body.map_err(|e| Error::invalid(format!("malformed status update: {}", e)))?;
    registry.set_status(&name, req.status).map(Json)
}

pub async fn handle_prune(
    Extension(registry): Extension<Arc<RegistryService>>,
    body: std::result::Result<Json<PruneRequest>, JsonRejection>,
) -> Result<Json<PruneResponse>> {
    let Json(req) = body.map_err(|e| Error::invalid(format!("malformed prune request: {}", e)))?;
    Ok(Json(PruneResponse {
        removed: registry.prune_older_than(req.cutoff_ms),
    }))
}
