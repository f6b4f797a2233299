//! Unified error handling for the gateway.
//!
//! ## Error Categories
//!
//! - [`RequestError`]: invalid arguments supplied by an HTTP caller
//! - [`ConfigError`]: configuration loading and validation
//! - [`TemplateError`](crate::template::TemplateError): mapping annotated structs
//!
//! Errors from the remote service are not classified. They travel as
//! `anyhow::Error` and reach the HTTP caller with their full message.

use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

/// The main error type for the gateway library.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The caller supplied an invalid argument.
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    /// An error occurred while loading or validating configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An annotated struct could not be mapped to work item fields.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// The remote work item tracking service failed.
    #[error("{0:#}")]
    Remote(#[from] anyhow::Error),
}

/// Invalid arguments supplied by a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The attachment file name has no extension.
    #[error("FileName does not have an extension (parameter '{parameter}'): {file_name}")]
    MissingExtension {
        /// Name of the offending parameter.
        parameter: &'static str,
        file_name: String,
    },

    /// The attachment body is not valid base64.
    #[error("Body is not a valid base64 string: {message}")]
    InvalidBase64 { message: String },
}

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required configuration field is missing.
    #[error("{field} is required (use --{field}, {env_var} env var, or config file)")]
    MissingRequired {
        /// Name of the missing field.
        field: String,
        /// Environment variable name for this field.
        env_var: String,
    },

    /// An invalid value was provided for a configuration field.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the field with invalid value.
        field: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// Failed to create config directory.
    #[error("Failed to create config directory at {path}: {message}")]
    DirectoryCreationError {
        /// Path where directory creation failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

/// Type alias for Results using GatewayError.
///
/// Not re-exported from the crate root to avoid shadowing `anyhow::Result`.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
