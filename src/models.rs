//! Data models for work item requests and remote work item views.
//!
//! The request types mirror the JSON accepted by the HTTP surface. The remote
//! types are slim views over the Azure DevOps payloads; field values and
//! relations stay as raw JSON because their schema belongs to the remote
//! process template.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Relation type used by Azure DevOps for file attachments.
pub const ATTACHED_FILE_RELATION: &str = "AttachedFile";

/// Patch path that appends to a work item's relation list.
pub const RELATIONS_APPEND_PATH: &str = "/relations/-";

/// Request body for creating a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkItem {
    /// Work item type name, e.g. "Bug" or "User Story".
    pub work_item_type: String,
    /// Field values in the order they should be applied.
    #[serde(default)]
    pub fields: Vec<WorkItemField>,
}

/// A single field assignment in a [`CreateWorkItem`] request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemField {
    /// Field reference name, e.g. "System.Title".
    pub reference_name: String,
    pub value: String,
}

impl CreateWorkItem {
    pub fn new(work_item_type: impl Into<String>) -> Self {
        Self {
            work_item_type: work_item_type.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field assignment, builder style.
    #[must_use]
    pub fn with_field(
        mut self,
        reference_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields.push(WorkItemField {
            reference_name: reference_name.into(),
            value: value.into(),
        });
        self
    }

    /// Builds the patch document that sets every field, preserving input order.
    pub fn to_patch(&self) -> Vec<PatchOperation> {
        self.fields
            .iter()
            .map(|f| PatchOperation::add_field(&f.reference_name, Value::String(f.value.clone())))
            .collect()
    }
}

/// JSON Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
    Test,
}

/// One operation of a work item patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOperation {
    /// `add /fields/{reference_name}`.
    pub fn add_field(reference_name: &str, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: format!("/fields/{}", reference_name),
            value: Some(value),
        }
    }

    /// `add /relations/-` linking an uploaded attachment.
    pub fn add_attachment(attachment: &AttachmentReference, file_name: &str, size: usize) -> Self {
        Self {
            op: PatchOp::Add,
            path: RELATIONS_APPEND_PATH.to_string(),
            value: Some(serde_json::json!({
                "rel": ATTACHED_FILE_RELATION,
                "url": attachment.url,
                "attributes": {
                    "name": file_name,
                    "resourceSize": size,
                },
            })),
        }
    }
}

/// Reference returned by the remote service after uploading attachment bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentReference {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}

/// A work item type and the reference names of its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemTypeInfo {
    pub name: String,
    pub field_reference_names: Vec<String>,
}

/// Type name to field reference names, as served by the types endpoint.
pub type WorkItemTypeFields = BTreeMap<String, Vec<String>>;

/// A work item as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<i32>,
    /// Field reference name to value.
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
    #[serde(default)]
    pub relations: Vec<WorkItemRelation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl WorkItem {
    /// Returns a field value as a string, if present and a string.
    pub fn field_str(&self, reference_name: &str) -> Option<&str> {
        self.fields.get(reference_name).and_then(Value::as_str)
    }

    /// Relations of type `AttachedFile`.
    pub fn attachments(&self) -> impl Iterator<Item = &WorkItemRelation> {
        self.relations
            .iter()
            .filter(|r| r.rel == ATTACHED_FILE_RELATION)
    }
}

/// A link from a work item to another resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemRelation {
    pub rel: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, Value>,
}
