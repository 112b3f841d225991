use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json, extract::Path};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::engine::SyncEngine;
use super::protocol::*;
use super::stats::SyncStatsSnapshot;
use super::types::ProductChangeEvent;
use crate::error::{Error, Result};

fn parse_event(
    body: std::result::Result<Json<ProductChangeEvent>, JsonRejection>,
) -> Result<ProductChangeEvent> {
    body.map(|Json(event)| event)
        .map_err(|e| Error::invalid(format!("malformed event body: {}", e)))
}

pub async fn handle_enqueue_event(
    Extension(events): Extension<mpsc::Sender<ProductChangeEvent>>,
    body: std::result::Result<Json<ProductChangeEvent>, JsonRejection>,
) -> Result<(StatusCode, Json<EnqueueResponse>)> {
    let event = parse_event(body)?;
    let product_id = event.product_id.clone();

    events
        .send(event)
        .await
        .map_err(|_| Error::storage("event consumer is not running"))?;

    tracing::debug!("Queued event for {}", product_id);
    Ok((
        StatusCode::ACCEPTED,
        Json(EnqueueResponse {
            accepted: true,
            product_id,
        }),
    ))
}

pub async fn handle_apply_event(
    Extension(engine): Extension<Arc<SyncEngine>>,
    body: std::result::Result<Json<ProductChangeEvent>, JsonRejection>,
) -> Result<Json<ApplyResponse>> {
    let event = parse_event(body)?;
    engine.stats().record_received();
    let outcome = engine.apply(&event).await?;

    Ok(Json(ApplyResponse {
        product_id: event.product_id,
        outcome,
    }))
}

pub async fn handle_sync_stats(
    Extension(engine): Extension<Arc<SyncEngine>>,
) -> Json<SyncStatsSnapshot> {
    Json(engine.stats().snapshot())
}

pub async fn handle_watermark(
    Extension(engine): Extension<Arc<SyncEngine>>,
    Path(product_id): Path<String>,
) -> Result<Json<WatermarkResponse>> {
    let watermark = engine.watermark(&product_id).await?;
    Ok(Json(WatermarkResponse {
        product_id,
        watermark,
    }))
}
