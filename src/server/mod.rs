//! HTTP surface of the gateway.
//!
//! Routes:
//!
//! | Method | Path                                                  |
//! |--------|-------------------------------------------------------|
//! | GET    | `/api/workitems/types`                                |
//! | GET    | `/api/workitems/types/{workItemType}`                 |
//! | GET    | `/api/workitems/{workItemId}`                         |
//! | POST   | `/api/workitems`                                      |
//! | POST   | `/api/workitems/{workItemId}/attachments/{fileName}`  |
//! | GET    | `/health`                                             |

mod error;
pub mod handlers;
mod health;

#[cfg(test)]
mod tests;

pub use error::{ApiErrorBody, ApiErrorResponse};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::AzureDevOpsClient;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: AzureDevOpsClient,
}

impl AppState {
    pub fn new(client: AzureDevOpsClient) -> Self {
        Self { client }
    }
}

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/workitems", post(handlers::create_work_item))
        .route("/api/workitems/types", get(handlers::list_work_item_types))
        .route(
            "/api/workitems/types/{work_item_type}",
            get(handlers::get_work_item_type),
        )
        .route("/api/workitems/{work_item_id}", get(handlers::get_work_item))
        .route(
            "/api/workitems/{work_item_id}/attachments/{file_name}",
            post(handlers::upload_attachment),
        )
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
