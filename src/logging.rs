//! Logging setup for the gateway.
//!
//! Logging is off unless a level is given, either through `--log-level` or
//! `WIT_GATEWAY_LOG_LEVEL`. Output goes to stderr or an append-only file, as
//! compact text or JSON.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a log level from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level (None means logging is disabled).
    pub level: Option<LogLevel>,
    /// Output file path (None means stderr).
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl LogConfig {
    /// Combine command line values with `WIT_GATEWAY_LOG_*` variables.
    ///
    /// Command line values win. Unparseable environment values are ignored.
    #[must_use]
    pub fn resolve(
        cli_level: Option<LogLevel>,
        cli_file: Option<PathBuf>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let env = |name: &str| std::env::var(format!("WIT_GATEWAY_LOG_{}", name)).ok();

        Self {
            level: cli_level.or_else(|| env("LEVEL").and_then(|s| LogLevel::parse(&s))),
            file: cli_file.or_else(|| env("FILE").map(PathBuf::from)),
            format: cli_format
                .or_else(|| env("FORMAT").and_then(|s| LogFormat::parse(&s)))
                .unwrap_or_default(),
        }
    }

    /// Filter directive covering this crate and the HTTP trace layer.
    fn filter(&self, level: LogLevel) -> EnvFilter {
        let level = level.as_filter_str();
        EnvFilter::new(format!("wit_gateway={level},tower_http={level}"))
    }
}

/// Guard that must be held to ensure logs are flushed.
///
/// Dropping it flushes pending log lines.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Initialize the logging system.
///
/// Returns `None` when logging is disabled or the log file cannot be opened.
///
/// # Example
///
/// ```rust,no_run
/// use wit_gateway::logging::{LogConfig, LogFormat, LogLevel, init_logging};
///
/// let config = LogConfig {
///     level: Some(LogLevel::Debug),
///     file: None,
///     format: LogFormat::Json,
/// };
///
/// let _guard = init_logging(config);
/// ```
#[must_use = "the returned guard must be held until application exit"]
pub fn init_logging(config: LogConfig) -> Option<LogGuard> {
    let level = config.level?;
    let filter = config.filter(level);

    let (non_blocking, guard) = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    let to_file = config.file.is_some();

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(to_file)
                .with_line_number(to_file);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_ansi(!to_file)
                .compact();

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }

    Some(LogGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::file_serial;
    use std::env;

    fn clear_env() {
        unsafe {
            env::remove_var("WIT_GATEWAY_LOG_LEVEL");
            env::remove_var("WIT_GATEWAY_LOG_FILE");
            env::remove_var("WIT_GATEWAY_LOG_FORMAT");
        }
    }

    /// # Test: Log Level Parsing
    ///
    /// ## Expected Outcome
    /// - Case-insensitive names parse, "warning" aliases warn, unknown is None
    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::parse("TRACE"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("Debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" info "), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("yaml"), None);
    }

    #[test]
    fn test_filter_includes_http_layer() {
        let config = LogConfig::default();
        let filter = config.filter(LogLevel::Debug).to_string();
        assert!(filter.contains("wit_gateway=debug"));
        assert!(filter.contains("tower_http=debug"));
    }

    /// # Test: CLI Overrides Environment
    ///
    /// ## Test Scenario
    /// - Set all three env vars, pass a CLI level only
    ///
    /// ## Expected Outcome
    /// - Level from CLI, file and format from env
    #[test]
    #[file_serial(env_tests)]
    fn test_resolve_cli_over_env() {
        unsafe {
            env::set_var("WIT_GATEWAY_LOG_LEVEL", "error");
            env::set_var("WIT_GATEWAY_LOG_FILE", "/tmp/wit-gateway.log");
            env::set_var("WIT_GATEWAY_LOG_FORMAT", "json");
        }

        let config = LogConfig::resolve(Some(LogLevel::Trace), None, None);
        clear_env();

        assert_eq!(config.level, Some(LogLevel::Trace));
        assert_eq!(config.file, Some(PathBuf::from("/tmp/wit-gateway.log")));
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    #[file_serial(env_tests)]
    fn test_resolve_disabled_without_level() {
        clear_env();

        let config = LogConfig::resolve(None, None, None);

        assert_eq!(config, LogConfig::default());
        assert!(init_logging(config).is_none());
    }

    #[test]
    #[file_serial(env_tests)]
    fn test_resolve_ignores_invalid_env_values() {
        unsafe {
            env::set_var("WIT_GATEWAY_LOG_LEVEL", "loud");
            env::set_var("WIT_GATEWAY_LOG_FORMAT", "xml");
        }

        let config = LogConfig::resolve(None, None, None);
        clear_env();

        assert_eq!(config.level, None);
        assert_eq!(config.format, LogFormat::Text);
    }
}
