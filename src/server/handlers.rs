//! Work item REST API handlers.
//!
//! Each handler maps path and body onto one client call and serializes the
//! result as JSON.

use axum::{
    Json,
    extract::{Path, State},
};

use super::AppState;
use crate::error::GatewayError;
use crate::models::{CreateWorkItem, WorkItem, WorkItemTypeFields};
use crate::utils::{decode_base64, require_extension};

pub type ApiResult<T> = Result<T, GatewayError>;

/// GET /api/workitems/types
///
/// All work item types of the project with their field reference names.
pub async fn list_work_item_types(
    State(state): State<AppState>,
) -> ApiResult<Json<WorkItemTypeFields>> {
    let types = state.client.work_item_types(None).await?;
    Ok(Json(types))
}

/// GET /api/workitems/types/{workItemType}
pub async fn get_work_item_type(
    State(state): State<AppState>,
    Path(work_item_type): Path<String>,
) -> ApiResult<Json<WorkItemTypeFields>> {
    let types = state
        .client
        .work_item_types(Some(&work_item_type))
        .await?;
    Ok(Json(types))
}

/// GET /api/workitems/{workItemId}
pub async fn get_work_item(
    State(state): State<AppState>,
    Path(work_item_id): Path<i32>,
) -> ApiResult<Json<WorkItem>> {
    let work_item = state.client.work_item(work_item_id).await?;
    Ok(Json(work_item))
}

/// POST /api/workitems
pub async fn create_work_item(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkItem>,
) -> ApiResult<Json<WorkItem>> {
    let work_item = state.client.create_work_item(&request).await?;
    Ok(Json(work_item))
}

/// POST /api/workitems/{workItemId}/attachments/{fileName}
///
/// The body is a JSON string holding base64 file content.
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path((work_item_id, file_name)): Path<(i32, String)>,
    Json(content): Json<String>,
) -> ApiResult<Json<WorkItem>> {
    require_extension(&file_name)?;
    let bytes = decode_base64(&content)?;

    let work_item = state
        .client
        .add_attachment(work_item_id, &file_name, bytes)
        .await?;
    Ok(Json(work_item))
}
