//! Azure DevOps API client module.
//!
//! This module provides a client for the Azure DevOps work item tracking APIs,
//! scoped to a single organization and project.
//!
//! ## Features
//!
//! - Work item type listing with field reference names
//! - Work item retrieval with relations
//! - Work item creation from request DTOs or annotated structs
//! - Attachment upload and linking
//!
//! ## Example
//!
//! ```rust,no_run
//! use wit_gateway::AzureDevOpsClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AzureDevOpsClient::new(
//!     "my-org".to_string(),
//!     "my-project".to_string(),
//!     "my-pat".to_string(),
//! )?;
//!
//! let types = client.work_item_types(None).await?;
//! println!("Found {} work item types", types.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod credential;
mod mappers;
pub mod traits;

pub use client::AzureDevOpsClient;
pub use credential::PatCredential;
pub use traits::{RealWitOperations, WorkItemTracking};
