//! Configuration management for wit-gateway.
//!
//! This module handles loading configuration from multiple sources:
//! - TOML configuration files following XDG Base Directory specification
//! - Environment variables
//! - Command line arguments
//!
//! ## Example
//!
//! ```rust
//! use wit_gateway::Config;
//!
//! // Load configuration from file, with fallback to defaults
//! let config = Config::load_from_file().unwrap();
//!
//! // Merge configurations (env takes precedence)
//! let merged = config.merge(Config::load_from_env());
//! println!("Listen address: {:?}", merged.listen);
//! ```

use crate::{error::ConfigError, parsed_property::ParsedProperty};
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "WIT_GATEWAY_";

/// Address the server binds to when none is configured.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

/// Temporary struct for deserializing TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub pat: Option<String>,
    pub listen: Option<String>,
}

/// Configuration assembled from CLI arguments, environment variables, config file, and defaults.
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Azure DevOps organization name.
    pub organization: Option<ParsedProperty<String>>,
    /// Azure DevOps project name.
    pub project: Option<ParsedProperty<String>>,
    /// Personal access token for authenticating with Azure DevOps.
    pub pat: Option<ParsedProperty<String>>,
    /// Socket address the HTTP server listens on.
    pub listen: Option<ParsedProperty<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: None,
            project: None,
            pat: None,
            listen: Some(ParsedProperty::Default(DEFAULT_LISTEN.to_string())),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("pat", &self.pat.as_ref().map(|p| p.source_name()))
            .field("listen", &self.listen)
            .finish()
    }
}

/// Fully resolved configuration used to start the gateway.
pub struct AppConfig {
    pub organization: ParsedProperty<String>,
    pub project: ParsedProperty<String>,
    pub pat: SecretString,
    pub listen: ParsedProperty<SocketAddr>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("pat", &"[REDACTED]")
            .field("listen", &self.listen)
            .finish()
    }
}

impl AppConfig {
    /// Logs every resolved value and where it came from.
    pub fn log_summary(&self) {
        tracing::info!(
            organization = %self.organization,
            source = self.organization.source_name(),
            "organization"
        );
        tracing::info!(
            project = %self.project,
            source = self.project.source_name(),
            "project"
        );
        tracing::info!(
            listen = %self.listen,
            source = self.listen.source_name(),
            "listen address"
        );
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(format!("{}{}", ENV_PREFIX, name)).ok()
}

impl Config {
    /// Load configuration from XDG config directory
    #[must_use = "this returns the loaded configuration which should be used"]
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config_file: ConfigFile = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        let file_property = |v: String| ParsedProperty::File(v.clone(), config_path.clone(), v);

        Ok(Self {
            organization: config_file.organization.map(file_property),
            project: config_file.project.map(file_property),
            pat: config_file.pat.map(file_property),
            listen: config_file.listen.map(file_property),
        }
        .merge_defaults())
    }

    /// Load configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            organization: env_var("ORGANIZATION").map(|v| ParsedProperty::Env(v.clone(), v)),
            project: env_var("PROJECT").map(|v| ParsedProperty::Env(v.clone(), v)),
            pat: env_var("PAT").map(|v| ParsedProperty::Env(v.clone(), v)),
            listen: env_var("LISTEN").map(|v| ParsedProperty::Env(v.clone(), v)),
        }
    }

    /// Get the XDG config directory path for wit-gateway
    fn get_config_path() -> Result<PathBuf> {
        // Use XDG_CONFIG_HOME if set, otherwise ~/.config
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config"),
        };

        Ok(config_dir.join("wit-gateway").join("config.toml"))
    }

    /// Fill unset values from [`Config::default`].
    fn merge_defaults(self) -> Self {
        Self::default().merge(self)
    }

    /// Merge this config with another, preferring values from other when they exist
    pub fn merge(self, other: Self) -> Self {
        Self {
            organization: other.organization.or(self.organization),
            project: other.project.or(self.project),
            pat: other.pat.or(self.pat),
            listen: other.listen.or(self.listen),
        }
    }

    /// Merge file, environment and `cli` sources and validate the result.
    ///
    /// Precedence: CLI > environment > file > defaults.
    pub fn resolve(cli: Self) -> Result<AppConfig> {
        let config = Self::load_from_file()?
            .merge(Self::load_from_env())
            .merge(cli);
        Ok(config.validate()?)
    }

    /// Check required values and parse typed ones.
    pub fn validate(self) -> std::result::Result<AppConfig, ConfigError> {
        let organization = required(self.organization, "organization")?;
        let project = required(self.project, "project")?;
        let pat = required(self.pat, "pat")?;

        let listen = self
            .listen
            .unwrap_or_else(|| ParsedProperty::Default(DEFAULT_LISTEN.to_string()));
        let addr: SocketAddr = listen.value().parse().map_err(|e| ConfigError::InvalidValue {
            field: "listen".to_string(),
            message: format!("'{}' is not a socket address: {}", listen.value(), e),
        })?;
        let listen = match listen {
            ParsedProperty::Cli(_, original) => ParsedProperty::Cli(addr, original),
            ParsedProperty::Env(_, original) => ParsedProperty::Env(addr, original),
            ParsedProperty::File(_, path, original) => ParsedProperty::File(addr, path, original),
            ParsedProperty::Default(_) => ParsedProperty::Default(addr),
        };

        Ok(AppConfig {
            organization,
            project,
            pat: SecretString::from(pat.value().clone()),
            listen,
        })
    }

    /// Create a sample config file for user reference
    #[must_use = "this operation can fail and the result should be checked"]
    pub fn create_sample_config() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        // Don't overwrite existing config
        if config_path.exists() {
            return Ok(config_path);
        }

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::DirectoryCreationError {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let sample_config = r#"# wit-gateway Configuration File
# Location: ~/.config/wit-gateway/config.toml (Linux/macOS)
#       or %APPDATA%\wit-gateway\config.toml (Windows)

# Azure DevOps organization (required)
# organization = "your-organization"

# Azure DevOps project (required)
# project = "your-project"

# Personal Access Token (required, but consider using environment variable WIT_GATEWAY_PAT instead)
# pat = "your-pat-token"

# Address the HTTP server listens on (optional, defaults to "127.0.0.1:5000")
listen = "127.0.0.1:5000"
"#;

        fs::write(&config_path, sample_config).with_context(|| {
            format!(
                "Failed to write sample config to: {}",
                config_path.display()
            )
        })?;

        Ok(config_path)
    }
}

fn required(
    value: Option<ParsedProperty<String>>,
    field: &str,
) -> std::result::Result<ParsedProperty<String>, ConfigError> {
    value
        .filter(|v| !v.value().trim().is_empty())
        .ok_or_else(|| ConfigError::MissingRequired {
            field: field.to_string(),
            env_var: format!("{}{}", ENV_PREFIX, field.to_uppercase()),
        })
}
