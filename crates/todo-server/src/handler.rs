use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use todo_lifecycle::ItemService;
use todo_types::{CreateItem, ItemId, ItemView, UpdateItem};

use crate::error::ServerResult;

/// Query string of the search endpoint. `q` is required; `?q=` matches every named item.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "todo-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_items(State(service): State<ItemService>) -> ServerResult<Json<Vec<ItemView>>> {
    Ok(Json(service.list().await?))
}

pub async fn get_item(
    State(service): State<ItemService>,
    Path(id): Path<ItemId>,
) -> ServerResult<Json<ItemView>> {
    Ok(Json(service.get(id).await?))
}

/// `201 Created` with a `Location` pointing at the new item.
pub async fn create_item(
    State(service): State<ItemService>,
    Json(request): Json<CreateItem>,
) -> ServerResult<impl IntoResponse> {
    let view = service.create(request).await?;
    let location = format!("/items/{}", view.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(view)))
}

pub async fn update_item(
    State(service): State<ItemService>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateItem>,
) -> ServerResult<Json<ItemView>> {
    Ok(Json(service.update(id, request).await?))
}

pub async fn delete_item(
    State(service): State<ItemService>,
    Path(id): Path<ItemId>,
) -> ServerResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_items(
    State(service): State<ItemService>,
    Query(params): Query<SearchParams>,
) -> ServerResult<Json<Vec<ItemView>>> {
    Ok(Json(service.search(&params.q).await?))
}
