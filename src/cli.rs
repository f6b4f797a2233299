use crate::{
    config::Config,
    logging::{LogConfig, LogFormat, LogLevel},
    parsed_property::ParsedProperty,
};
use clap::Parser;
use std::path::PathBuf;

/// HTTP gateway over the Azure DevOps work item tracking API.
#[derive(Parser, Clone, Default)]
#[command(
    name = "wit-gateway",
    version,
    about = "HTTP gateway for Azure DevOps work items",
    long_about = "Serves a small REST API for listing work item types, reading and \
        creating work items, and attaching files, backed by one Azure DevOps \
        organization and project.\n\n\
        Connection values can come from command line flags, WIT_GATEWAY_* environment \
        variables, or the config file (~/.config/wit-gateway/config.toml).",
    after_help = "EXAMPLES:\n    \
        # Serve on the default address\n    \
        wit-gateway -o myorg -p myproject -t <PAT>\n\n    \
        # Serve on all interfaces with debug logging\n    \
        wit-gateway -l 0.0.0.0:8080 --log-level debug\n\n    \
        # Create sample config file\n    \
        wit-gateway --create-config"
)]
pub struct Args {
    /// Azure DevOps organization name
    #[arg(short, long, help_heading = "Azure DevOps Connection")]
    pub organization: Option<String>,

    /// Azure DevOps project name
    #[arg(short, long, help_heading = "Azure DevOps Connection")]
    pub project: Option<String>,

    /// Personal Access Token for Azure DevOps API authentication
    #[arg(short = 't', long, help_heading = "Azure DevOps Connection")]
    pub pat: Option<String>,

    /// Socket address to listen on [default: 127.0.0.1:5000]
    #[arg(short, long, help_heading = "Server")]
    pub listen: Option<String>,

    /// Log level; logging is disabled when unset
    #[arg(long, value_enum, help_heading = "Logging")]
    pub log_level: Option<LogLevel>,

    /// Write logs to this file instead of stderr
    #[arg(long, help_heading = "Logging")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, help_heading = "Logging")]
    pub log_format: Option<LogFormat>,

    /// Create a sample configuration file at ~/.config/wit-gateway/config.toml
    #[arg(long)]
    pub create_config: bool,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("pat", &self.pat.as_ref().map(|_| "[REDACTED]"))
            .field("listen", &self.listen)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .field("log_format", &self.log_format)
            .field("create_config", &self.create_config)
            .finish()
    }
}

impl Args {
    /// Connection and server values given on the command line.
    pub fn to_config(&self) -> Config {
        let cli = |v: &Option<String>| {
            v.as_ref().map(|v| ParsedProperty::Cli(v.clone(), v.clone()))
        };

        Config {
            organization: cli(&self.organization),
            project: cli(&self.project),
            pat: cli(&self.pat),
            listen: cli(&self.listen),
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::resolve(self.log_level, self.log_file.clone(), self.log_format)
    }
}
