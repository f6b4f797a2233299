//! Annotation-driven mapping from plain structs to work item fields.
//!
//! A struct opts in by implementing [`WorkItemTemplate`] and `Serialize`. Each
//! serialized field name is taken as the field reference name, so every field
//! is annotated with `#[serde(rename = "...")]`. A serialized name that is not a
//! dotted reference name such as `System.Title` is rejected:
//!
//! ```rust
//! use serde::Serialize;
//! use wit_gateway::template::{WorkItemTemplate, template_fields};
//!
//! #[derive(Serialize)]
//! struct BugReport {
//!     #[serde(rename = "System.Title")]
//!     title: String,
//!     #[serde(rename = "Microsoft.VSTS.TCM.ReproSteps")]
//!     repro_steps: Option<String>,
//! }
//!
//! impl WorkItemTemplate for BugReport {
//!     const WORK_ITEM_TYPE: &'static str = "Bug";
//! }
//!
//! let bug = BugReport { title: "Crash".to_string(), repro_steps: None };
//! let fields = template_fields(&bug).unwrap();
//! assert_eq!(fields.len(), 1);
//! assert_eq!(fields[0].0, "System.Title");
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::PatchOperation;

/// A struct whose serialized fields map onto work item fields.
pub trait WorkItemTemplate: Serialize {
    /// Work item type name the template creates, e.g. "Bug".
    const WORK_ITEM_TYPE: &'static str;
}

/// Raised when a template cannot be mapped to work item fields.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The type serialized to something other than a struct-like map.
    #[error("{type_name} does not serialize to a map of work item fields")]
    NotAMap { type_name: &'static str },

    /// The type has no fields to map.
    #[error("{type_name} has no fields mapped to work item reference names")]
    NoFields { type_name: &'static str },

    /// A serialized field name is not a dotted reference name.
    #[error("{type_name} field '{field}' is not mapped to a work item reference name")]
    Unannotated {
        type_name: &'static str,
        field: String,
    },

    #[error("Failed to serialize {type_name}: {source}")]
    Serialize {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Returns `(reference name, value)` pairs in declaration order, skipping nulls.
pub fn template_fields<T: WorkItemTemplate>(
    item: &T,
) -> Result<Vec<(String, Value)>, TemplateError> {
    let type_name = std::any::type_name::<T>();

    let value = serde_json::to_value(item).map_err(|source| TemplateError::Serialize {
        type_name,
        source,
    })?;

    let Value::Object(map) = value else {
        return Err(TemplateError::NotAMap { type_name });
    };

    if map.is_empty() {
        return Err(TemplateError::NoFields { type_name });
    }

    if let Some(field) = map.keys().find(|k| !is_reference_name(k)) {
        return Err(TemplateError::Unannotated {
            type_name,
            field: field.clone(),
        });
    }

    Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect())
}

/// `Namespace.Name` with no empty segment, e.g. `Microsoft.VSTS.Common.Priority`.
fn is_reference_name(name: &str) -> bool {
    let mut segments = name.split('.');
    segments.clone().count() >= 2 && segments.all(|s| !s.trim().is_empty())
}

/// Builds the creation patch document for a template.
pub fn template_patch<T: WorkItemTemplate>(
    item: &T,
) -> Result<Vec<PatchOperation>, TemplateError> {
    Ok(template_fields(item)?
        .into_iter()
        .map(|(name, value)| PatchOperation::add_field(&name, value))
        .collect())
}
