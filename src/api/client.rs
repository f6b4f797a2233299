//! Azure DevOps work item tracking client.
//!
//! Forwards each call to a [`WorkItemTracking`] implementation scoped to one
//! organization and one project.

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;

use super::credential::PatCredential;
use super::traits::{RealWitOperations, WorkItemTracking};
use crate::models::{CreateWorkItem, PatchOperation, WorkItem, WorkItemTypeFields};
use crate::template::{WorkItemTemplate, template_patch};

/// Azure DevOps API client for work item tracking.
///
/// # Example
///
/// ```rust,no_run
/// use wit_gateway::api::AzureDevOpsClient;
/// use wit_gateway::models::CreateWorkItem;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AzureDevOpsClient::new(
///     "my-org".to_string(),
///     "my-project".to_string(),
///     "my-pat".to_string(),
/// )?;
///
/// let request = CreateWorkItem::new("Task").with_field("System.Title", "Write docs");
/// let work_item = client.create_work_item(&request).await?;
/// println!("Created work item {}", work_item.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AzureDevOpsClient {
    organization: String,
    project: String,
    wit: Arc<dyn WorkItemTracking>,
}

impl AzureDevOpsClient {
    /// Creates a new Azure DevOps API client.
    ///
    /// # Arguments
    ///
    /// * `organization` - Azure DevOps organization name
    /// * `project` - Azure DevOps project name
    /// * `pat` - Personal Access Token for authentication
    pub fn new(organization: String, project: String, pat: String) -> Result<Self> {
        Self::new_with_secret(organization, project, SecretString::from(pat))
    }

    /// Creates a new Azure DevOps API client with a SecretString PAT.
    ///
    /// This is the preferred constructor when the PAT is already wrapped in a SecretString.
    pub fn new_with_secret(
        organization: String,
        project: String,
        pat: SecretString,
    ) -> Result<Self> {
        let credential = PatCredential::new(pat);
        let wit = RealWitOperations::new(credential);
        Ok(Self::with_operations(organization, project, Arc::new(wit)))
    }

    /// Creates a client over an arbitrary operations implementation.
    pub fn with_operations(
        organization: String,
        project: String,
        wit: Arc<dyn WorkItemTracking>,
    ) -> Self {
        Self {
            organization,
            project,
            wit,
        }
    }

    /// Returns the organization name.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the project name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns work item types and their field reference names.
    ///
    /// With `work_item_type` set, the map holds only that type.
    #[tracing::instrument(skip(self))]
    pub async fn work_item_types(
        &self,
        work_item_type: Option<&str>,
    ) -> Result<WorkItemTypeFields> {
        let types = match work_item_type {
            None => self
                .wit
                .list_work_item_types(&self.organization, &self.project)
                .await
                .context("Failed to list work item types")?,
            Some(name) => vec![
                self.wit
                    .get_work_item_type(&self.organization, &self.project, name)
                    .await
                    .with_context(|| format!("Failed to fetch work item type '{}'", name))?,
            ],
        };

        tracing::debug!(count = types.len(), "fetched work item types");
        Ok(types
            .into_iter()
            .map(|t| (t.name, t.field_reference_names))
            .collect())
    }

    /// Fetches a single work item with its relations.
    #[tracing::instrument(skip(self))]
    pub async fn work_item(&self, id: i32) -> Result<WorkItem> {
        self.wit
            .get_work_item(&self.organization, id, &self.project)
            .await
            .with_context(|| format!("Failed to fetch work item {}", id))
    }

    /// Creates a work item from a request DTO.
    #[tracing::instrument(skip(self, request), fields(work_item_type = %request.work_item_type))]
    pub async fn create_work_item(&self, request: &CreateWorkItem) -> Result<WorkItem> {
        self.create_with_patch(&request.work_item_type, request.to_patch())
            .await
    }

    /// Creates a work item from a [`WorkItemTemplate`] value.
    #[tracing::instrument(skip(self, item), fields(work_item_type = T::WORK_ITEM_TYPE))]
    pub async fn create_work_item_from<T: WorkItemTemplate + Sync>(
        &self,
        item: &T,
    ) -> Result<WorkItem> {
        let patch = template_patch(item)?;
        self.create_with_patch(T::WORK_ITEM_TYPE, patch).await
    }

    async fn create_with_patch(
        &self,
        work_item_type: &str,
        patch: Vec<PatchOperation>,
    ) -> Result<WorkItem> {
        let work_item = self
            .wit
            .create_work_item(&self.organization, patch, &self.project, work_item_type)
            .await
            .with_context(|| format!("Failed to create {} work item", work_item_type))?;

        tracing::info!(id = work_item.id, work_item_type, "created work item");
        Ok(work_item)
    }

    /// Uploads `content` and links it to the work item as an attachment.
    ///
    /// Returns the updated work item.
    #[tracing::instrument(skip(self, content), fields(size = content.len()))]
    pub async fn add_attachment(
        &self,
        work_item_id: i32,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<WorkItem> {
        let size = content.len();

        let reference = self
            .wit
            .create_attachment(&self.organization, &self.project, file_name, content)
            .await
            .with_context(|| format!("Failed to upload attachment '{}'", file_name))?;

        let patch = vec![PatchOperation::add_attachment(&reference, file_name, size)];

        let work_item = self
            .wit
            .update_work_item(&self.organization, patch, work_item_id, &self.project)
            .await
            .with_context(|| format!("Failed to link attachment to work item {}", work_item_id))?;

        tracing::info!(work_item_id, file_name, size, "attached file");
        Ok(work_item)
    }
}

impl std::fmt::Debug for AzureDevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureDevOpsClient")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}
