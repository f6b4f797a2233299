//! Model mapping utilities for converting between azure_devops_rust_api types and our domain types.
//!
//! The generated SDK models nest and flatten their payloads differently from
//! the REST wire format. Mapping goes through the serialized JSON, which is the
//! documented wire shape, so the views stay stable across SDK releases.

use anyhow::{Context, Result};
use azure_devops_rust_api::wit::models as wit_models;
use serde_json::Value;

use crate::models::{PatchOp, PatchOperation, WorkItem, WorkItemRelation, WorkItemTypeInfo};

/// Convert an SDK work item into our [`WorkItem`] view.
pub fn work_item_from_sdk(wi: &wit_models::WorkItem) -> Result<WorkItem> {
    let value = serde_json::to_value(wi).context("Failed to serialize work item")?;
    Ok(work_item_from_json(&value, wi.id))
}

/// Reads a work item from its REST JSON representation.
///
/// `id` is taken from the caller because it is always present on the SDK type.
pub fn work_item_from_json(value: &Value, id: i32) -> WorkItem {
    let fields = value
        .get("fields")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let relations = value
        .get("relations")
        .and_then(Value::as_array)
        .map(|rels| rels.iter().filter_map(relation_from_json).collect())
        .unwrap_or_default();

    WorkItem {
        id,
        rev: value
            .get("rev")
            .and_then(Value::as_i64)
            .and_then(|r| i32::try_from(r).ok()),
        fields,
        relations,
        url: value.get("url").and_then(Value::as_str).map(String::from),
    }
}

fn relation_from_json(value: &Value) -> Option<WorkItemRelation> {
    Some(WorkItemRelation {
        rel: value.get("rel")?.as_str()?.to_string(),
        url: value.get("url")?.as_str()?.to_string(),
        attributes: value
            .get("attributes")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
    })
}

/// Convert an SDK work item type into our [`WorkItemTypeInfo`] view.
pub fn work_item_type_from_sdk(wit: &wit_models::WorkItemType) -> Result<WorkItemTypeInfo> {
    let value = serde_json::to_value(wit).context("Failed to serialize work item type")?;
    work_item_type_from_json(&value)
}

/// Reads a work item type from its REST JSON representation.
pub fn work_item_type_from_json(value: &Value) -> Result<WorkItemTypeInfo> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .context("Work item type has no name")?
        .to_string();

    let field_reference_names = value
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f.get("referenceName").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(WorkItemTypeInfo {
        name,
        field_reference_names,
    })
}

/// Convert our patch document into the SDK's JSON patch operations.
pub fn patch_to_sdk(patch: Vec<PatchOperation>) -> Vec<wit_models::JsonPatchOperation> {
    use wit_models::json_patch_operation::Op;

    patch
        .into_iter()
        .map(|p| wit_models::JsonPatchOperation {
            op: Some(match p.op {
                PatchOp::Add => Op::Add,
                PatchOp::Replace => Op::Replace,
                PatchOp::Remove => Op::Remove,
                PatchOp::Test => Op::Test,
            }),
            path: Some(p.path),
            value: p.value,
            from: None,
        })
        .collect()
}
