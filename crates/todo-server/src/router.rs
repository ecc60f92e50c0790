use axum::routing::get;
use axum::Router;
use todo_lifecycle::ItemService;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Build the axum router with all todo endpoints.
pub fn build_router(service: ItemService) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route("/items", get(handler::list_items).post(handler::create_item))
        .route("/items/search", get(handler::search_items))
        .route(
            "/items/:id",
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
