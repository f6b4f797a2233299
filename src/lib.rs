//! # wit-gateway
//!
//! An HTTP gateway over the Azure DevOps work item tracking API, scoped to a
//! single organization and project. It provides:
//!
//! - Listing work item types with their field reference names
//! - Reading a work item with its relations
//! - Creating work items from a request body or from an annotated struct
//! - Uploading files and linking them to a work item
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wit_gateway::{AzureDevOpsClient, CreateWorkItem};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AzureDevOpsClient::new(
//!     "my-org".to_string(),
//!     "my-project".to_string(),
//!     "my-pat".to_string(),
//! )?;
//!
//! let request = CreateWorkItem::new("Task").with_field("System.Title", "Write docs");
//! let created = client.create_work_item(&request).await?;
//! println!("Created work item {}", created.id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod parsed_property;
pub mod server;
pub mod template;
pub mod utils;

// Re-export commonly used types for convenience
pub use api::AzureDevOpsClient;
pub use cli::Args;
pub use config::{AppConfig, Config};
pub use error::{GatewayError, GatewayResult};
pub use models::{CreateWorkItem, WorkItem, WorkItemField};
pub use server::{AppState, build_router};
pub use template::WorkItemTemplate;

/// Core result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
