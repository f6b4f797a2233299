use std::{fmt::Display, ops::Deref, path::PathBuf};

/// A configuration property that tracks its source and original value
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ParsedProperty<T> {
    /// Value from command line arguments (parsed_value, original_string)
    Cli(T, String),
    /// Value from environment variable (parsed_value, env_var_value)
    Env(T, String),
    /// Value from configuration file (parsed_value, toml_value_string)
    File(T, PathBuf, String),
    /// Default value when no other source provided
    Default(T),
}

impl<T> ParsedProperty<T> {
    /// Get the parsed value
    pub fn value(&self) -> &T {
        match self {
            ParsedProperty::Cli(value, _) => value,
            ParsedProperty::Env(value, _) => value,
            ParsedProperty::File(value, _, _) => value,
            ParsedProperty::Default(value) => value,
        }
    }

    /// Get the source name as a string
    pub fn source_name(&self) -> &'static str {
        match self {
            ParsedProperty::Cli(_, _) => "cli",
            ParsedProperty::Env(_, _) => "env",
            ParsedProperty::File(_, _, _) => "file",
            ParsedProperty::Default(_) => "default",
        }
    }

    /// Get the original string value if available
    pub fn original(&self) -> Option<&str> {
        match self {
            ParsedProperty::Cli(_, original) => Some(original),
            ParsedProperty::Env(_, original) => Some(original),
            ParsedProperty::File(_, _, original) => Some(original),
            ParsedProperty::Default(_) => None,
        }
    }

    /// Check if this property came from a specific source
    pub fn is_from_source(&self, source: &str) -> bool {
        self.source_name() == source
    }
}

impl<T> Deref for ParsedProperty<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

impl<T: Display> Display for ParsedProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value().fmt(f)
    }
}

impl<T: AsRef<str>> AsRef<str> for ParsedProperty<T> {
    fn as_ref(&self) -> &str {
        self.value().as_ref()
    }
}

impl<T> From<T> for ParsedProperty<T> {
    fn from(value: T) -> Self {
        ParsedProperty::Default(value)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// # ParsedProperty Value Access
    ///
    /// Tests accessing the parsed value from different source variants.
    ///
    /// ## Expected Outcome
    /// - Both value() and deref return the same parsed value
    #[test]
    fn test_parsed_property_value_access() {
        let cli_prop = ParsedProperty::Cli(
            "my-org".to_string(),
            "--organization my-org".to_string(),
        );
        let env_prop = ParsedProperty::Env("my-org".to_string(), "my-org".to_string());
        let file_prop = ParsedProperty::File(
            "my-org".to_string(),
            PathBuf::from("/etc/wit-gateway/config.toml"),
            "organization = \"my-org\"".to_string(),
        );
        let default_prop = ParsedProperty::Default("my-org".to_string());

        assert_eq!(cli_prop.value(), "my-org");
        assert_eq!(env_prop.value(), "my-org");
        assert_eq!(file_prop.value(), "my-org");
        assert_eq!(default_prop.value(), "my-org");

        assert_eq!(&*cli_prop, "my-org");
        assert_eq!(&*default_prop, "my-org");
    }

    /// # ParsedProperty Source Tracking
    ///
    /// Tests source name and original value tracking.
    ///
    /// ## Expected Outcome
    /// - Source names are correctly identified
    /// - Original values are preserved for non-default sources
    #[test]
    fn test_parsed_property_source_tracking() {
        let cli_prop = ParsedProperty::Cli(
            "0.0.0.0:8080".to_string(),
            "--listen 0.0.0.0:8080".to_string(),
        );
        let env_prop = ParsedProperty::Env(
            "0.0.0.0:8080".to_string(),
            "WIT_GATEWAY_LISTEN=0.0.0.0:8080".to_string(),
        );
        let default_prop = ParsedProperty::Default("127.0.0.1:5000".to_string());

        assert_eq!(cli_prop.source_name(), "cli");
        assert_eq!(env_prop.source_name(), "env");
        assert_eq!(default_prop.source_name(), "default");

        assert_eq!(cli_prop.original(), Some("--listen 0.0.0.0:8080"));
        assert_eq!(env_prop.original(), Some("WIT_GATEWAY_LISTEN=0.0.0.0:8080"));
        assert_eq!(default_prop.original(), None);

        assert!(cli_prop.is_from_source("cli"));
        assert!(!cli_prop.is_from_source("env"));
        assert!(default_prop.is_from_source("default"));
    }

    #[test]
    fn test_parsed_property_display_and_from() {
        let prop: ParsedProperty<u16> = 5000.into();
        assert_eq!(prop.to_string(), "5000");
        assert!(prop.is_from_source("default"));
    }
}
