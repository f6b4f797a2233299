//! Traits for Azure DevOps work item tracking operations.
//!
//! These traits abstract the remote calls to enable:
//! - Mocking for unit tests
//! - Alternative implementations

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use azure_devops_rust_api::wit;

use super::credential::PatCredential;
use super::mappers::{patch_to_sdk, work_item_from_sdk, work_item_type_from_sdk};
use crate::models::{AttachmentReference, PatchOperation, WorkItem, WorkItemTypeInfo};

/// Base URL of the Azure DevOps services.
pub const DEFAULT_ENDPOINT: &str = "https://dev.azure.com";

/// REST API version used for raw requests.
const API_VERSION: &str = "7.1";

/// Trait for work item tracking operations.
///
/// Every method is a single remote call; errors are returned as-is.
#[async_trait]
pub trait WorkItemTracking: Send + Sync {
    /// Lists all work item types of a project.
    async fn list_work_item_types(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<WorkItemTypeInfo>>;

    /// Gets a single work item type by name.
    async fn get_work_item_type(
        &self,
        organization: &str,
        project: &str,
        work_item_type: &str,
    ) -> Result<WorkItemTypeInfo>;

    /// Gets a work item with its relations expanded.
    async fn get_work_item(
        &self,
        organization: &str,
        work_item_id: i32,
        project: &str,
    ) -> Result<WorkItem>;

    /// Creates a work item of the given type from a patch document.
    async fn create_work_item(
        &self,
        organization: &str,
        patch: Vec<PatchOperation>,
        project: &str,
        work_item_type: &str,
    ) -> Result<WorkItem>;

    /// Applies a patch document to an existing work item.
    async fn update_work_item(
        &self,
        organization: &str,
        patch: Vec<PatchOperation>,
        work_item_id: i32,
        project: &str,
    ) -> Result<WorkItem>;

    /// Uploads attachment content and returns its reference.
    async fn create_attachment(
        &self,
        organization: &str,
        project: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<AttachmentReference>;
}

/// Real implementation wrapping azure_devops_rust_api::wit::Client.
///
/// Attachment uploads go through a raw `reqwest` request because the content
/// is an `application/octet-stream` body.
#[derive(Clone)]
pub struct RealWitOperations {
    client: wit::Client,
    http: reqwest::Client,
    credential: PatCredential,
    endpoint: String,
}

impl RealWitOperations {
    /// Creates a new RealWitOperations wrapper.
    pub fn new(credential: PatCredential) -> Self {
        let client = wit::ClientBuilder::new(credential.to_sdk_credential()).build();
        Self {
            client,
            http: reqwest::Client::new(),
            credential,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Sends raw requests to `endpoint` instead of [`DEFAULT_ENDPOINT`].
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl WorkItemTracking for RealWitOperations {
    async fn list_work_item_types(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<WorkItemTypeInfo>> {
        let types = self
            .client
            .work_item_types_client()
            .list(organization, project)
            .await?;
        types.value.iter().map(work_item_type_from_sdk).collect()
    }

    async fn get_work_item_type(
        &self,
        organization: &str,
        project: &str,
        work_item_type: &str,
    ) -> Result<WorkItemTypeInfo> {
        let wit_type = self
            .client
            .work_item_types_client()
            .get(organization, project, work_item_type)
            .await?;
        work_item_type_from_sdk(&wit_type)
    }

    async fn get_work_item(
        &self,
        organization: &str,
        work_item_id: i32,
        project: &str,
    ) -> Result<WorkItem> {
        let work_item = self
            .client
            .work_items_client()
            .get_work_item(organization, work_item_id, project)
            .expand("relations")
            .await?;
        work_item_from_sdk(&work_item)
    }

    async fn create_work_item(
        &self,
        organization: &str,
        patch: Vec<PatchOperation>,
        project: &str,
        work_item_type: &str,
    ) -> Result<WorkItem> {
        let work_item = self
            .client
            .work_items_client()
            .create(organization, patch_to_sdk(patch), project, work_item_type)
            .await?;
        work_item_from_sdk(&work_item)
    }

    async fn update_work_item(
        &self,
        organization: &str,
        patch: Vec<PatchOperation>,
        work_item_id: i32,
        project: &str,
    ) -> Result<WorkItem> {
        let work_item = self
            .client
            .work_items_client()
            .update(organization, patch_to_sdk(patch), work_item_id, project)
            .await?;
        work_item_from_sdk(&work_item)
    }

    async fn create_attachment(
        &self,
        organization: &str,
        project: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<AttachmentReference> {
        let url = format!(
            "{}/{}/{}/_apis/wit/attachments",
            self.endpoint, organization, project
        );

        let request = self
            .http
            .post(&url)
            .query(&[
                ("fileName", file_name),
                ("uploadType", "Simple"),
                ("api-version", API_VERSION),
            ])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content);

        let response = self
            .credential
            .apply(request)
            .send()
            .await
            .context("Attachment upload request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("{}: {}", status, body));
        }

        let reference = response
            .json::<AttachmentReference>()
            .await
            .context("Failed to parse attachment reference")?;
        Ok(reference)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        http::{StatusCode, header},
        routing::post,
    };
    use tokio::net::TcpListener;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn operations(endpoint: String) -> RealWitOperations {
        RealWitOperations::new(PatCredential::from_string("pat".to_string()))
            .with_endpoint(endpoint)
    }

    /// # Attachment Upload Failure Keeps Remote Message
    ///
    /// Tests that a rejected upload reports the service's own error body.
    ///
    /// ## Expected Outcome
    /// - Error names the status and carries the response body verbatim
    #[tokio::test]
    async fn test_create_attachment_error_keeps_remote_body() {
        let router = Router::new().route(
            "/org/proj/_apis/wit/attachments",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    r#"{"message":"VS403403: Access denied for attachment upload"}"#,
                )
            }),
        );
        let ops = operations(serve(router).await);

        let err = ops
            .create_attachment("org", "proj", "notes.txt", b"hello".to_vec())
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("401"), "unexpected error: {message}");
        assert!(message.contains("VS403403: Access denied for attachment upload"));
    }

    #[tokio::test]
    async fn test_create_attachment_success() {
        let router = Router::new().route(
            "/org/proj/_apis/wit/attachments",
            post(|headers: axum::http::HeaderMap, body: axum::body::Bytes| async move {
                assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
                assert!(headers.contains_key(header::AUTHORIZATION));
                assert_eq!(&body[..], b"hello");
                axum::Json(serde_json::json!({
                    "id": "a1",
                    "url": "https://dev.azure.com/org/_apis/wit/attachments/a1"
                }))
            }),
        );
        let ops = operations(format!("{}/", serve(router).await));

        let reference = ops
            .create_attachment("org", "proj", "notes.txt", b"hello".to_vec())
            .await
            .unwrap();

        assert_eq!(reference.id.as_deref(), Some("a1"));
        assert!(reference.url.ends_with("/a1"));
    }
}
