use axum::extract::{Path, Query};
use axum::{Extension, Json};
use std::sync::Arc;

use super::engine::QueryEngine;
use super::types::{SearchParams, SearchQuery, SearchResult};
use crate::error::Result;
use crate::index::types::Product;

pub async fn handle_search(
    Extension(engine): Extension<Arc<QueryEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>> {
    let query = SearchQuery::from_params(params, engine.config())?;
    engine.search(&query).await.map(Json)
}

pub async fn handle_get_product(
    Extension(engine): Extension<Arc<QueryEngine>>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    engine.get_product(&id).await.map(Json)
}
