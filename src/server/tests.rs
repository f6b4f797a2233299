use super::{AppState, build_router};
use crate::api::AzureDevOpsClient;
use crate::api::traits::mocks::MockWitOperations;
use crate::models::{AttachmentReference, WorkItem, WorkItemTypeInfo};

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

fn test_app() -> (Router, MockWitOperations) {
    let mock = MockWitOperations::new();
    let client = AzureDevOpsClient::with_operations(
        "org".to_string(),
        "proj".to_string(),
        Arc::new(mock.clone()),
    );
    (build_router(AppState::new(client)), mock)
}

fn work_item(id: i32, title: &str) -> WorkItem {
    let mut fields = serde_json::Map::new();
    fields.insert("System.Title".to_string(), json!(title));
    WorkItem {
        id,
        rev: Some(1),
        fields,
        relations: vec![],
        url: None,
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_work_item_types() {
    let (app, mock) = test_app();
    mock.set_list_types_response(Ok(vec![WorkItemTypeInfo {
        name: "Bug".to_string(),
        field_reference_names: vec!["System.Title".to_string(), "System.State".to_string()],
    }]))
    .await;

    let request = Request::builder()
        .uri("/api/workitems/types")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "Bug": ["System.Title", "System.State"] }));
}

#[tokio::test]
async fn test_get_single_work_item_type_decodes_path() {
    let (app, mock) = test_app();
    mock.set_get_type_response(Ok(WorkItemTypeInfo {
        name: "User Story".to_string(),
        field_reference_names: vec!["System.Title".to_string()],
    }))
    .await;

    let request = Request::builder()
        .uri("/api/workitems/types/User%20Story")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["User Story"], json!(["System.Title"]));
    assert_eq!(
        *mock.requested_types.lock().await,
        vec!["User Story".to_string()]
    );
}

#[tokio::test]
async fn test_get_work_item() {
    let (app, mock) = test_app();
    mock.set_get_work_item_response(Ok(work_item(31, "Fix login")))
        .await;

    let request = Request::builder()
        .uri("/api/workitems/31")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], 31);
    assert_eq!(json["fields"]["System.Title"], "Fix login");
    assert_eq!(*mock.requested_ids.lock().await, vec![31]);
}

#[tokio::test]
async fn test_get_work_item_with_non_numeric_id_is_rejected() {
    let (app, mock) = test_app();

    let request = Request::builder()
        .uri("/api/workitems/abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mock.requested_ids.lock().await.is_empty());
}

#[tokio::test]
async fn test_get_work_item_remote_failure_returns_502() {
    let (app, mock) = test_app();
    mock.set_get_work_item_response(Err(anyhow::anyhow!(
        "TF401232: Work item 404 does not exist"
    )))
    .await;

    let request = Request::builder()
        .uri("/api/workitems/404")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("TF401232")
    );
}

#[tokio::test]
async fn test_create_work_item() {
    let (app, mock) = test_app();
    mock.set_create_response(Ok(work_item(77, "New task"))).await;

    let request = json_post(
        "/api/workitems",
        json!({
            "workItemType": "Task",
            "fields": [
                { "referenceName": "System.Title", "value": "New task" },
                { "referenceName": "System.Description", "value": "Details" }
            ]
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], 77);

    let calls = mock.create_calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].work_item_type, "Task");
    assert_eq!(calls[0].patch.len(), 2);
    assert_eq!(calls[0].patch[1].path, "/fields/System.Description");
}

#[tokio::test]
async fn test_create_work_item_malformed_body_is_rejected() {
    let (app, mock) = test_app();

    let request = json_post("/api/workitems", json!({ "fields": [] }));
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    assert!(mock.create_calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_upload_attachment() {
    let (app, mock) = test_app();
    mock.set_attachment_response(Ok(AttachmentReference {
        id: Some("f00".to_string()),
        url: "https://dev.azure.com/org/_apis/wit/attachments/f00".to_string(),
    }))
    .await;
    mock.set_update_response(Ok(work_item(12, "With file"))).await;

    // "hello world" in base64
    let request = json_post(
        "/api/workitems/12/attachments/greeting.txt",
        json!("aGVsbG8gd29ybGQ="),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let uploads = mock.attachment_calls.lock().await;
    assert_eq!(uploads[0].file_name, "greeting.txt");
    assert_eq!(uploads[0].content, b"hello world");

    let updates = mock.update_calls.lock().await;
    assert_eq!(updates[0].work_item_id, 12);
    let value = updates[0].patch[0].value.as_ref().unwrap();
    assert_eq!(value["attributes"]["resourceSize"], 11);
}

#[tokio::test]
async fn test_upload_attachment_without_extension_is_rejected() {
    let (app, mock) = test_app();

    let request = json_post("/api/workitems/12/attachments/README", json!("aGk="));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert!(mock.attachment_calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_upload_attachment_invalid_base64_is_rejected() {
    let (app, mock) = test_app();

    let request = json_post("/api/workitems/12/attachments/data.bin", json!("%%%"));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mock.attachment_calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let (app, _mock) = test_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], crate::VERSION);
}
