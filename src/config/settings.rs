use serde::Deserialize;

/// ================================
/// Optional file configuration of the binary
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    /// Event Hubs namespace, may be empty after `${EVENTHUB_NAMESPACE:}` expansion
    pub namespace: Option<String>,
    pub logging: Option<LoggingConfig>,
}

impl ServiceConfig {
    /// Namespace with empty strings normalised away.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// Namespace to pass explicitly to the provider: a non-empty command line
    /// value, then the file. `None` leaves the lookup to `EVENTHUB_NAMESPACE`.
    pub fn explicit_namespace<'a>(&'a self, cli: Option<&'a str>) -> Option<&'a str> {
        cli.filter(|ns| !ns.is_empty()).or(self.namespace())
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_level(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::namespace::{resolve_namespace_with, NamespaceOrigin};

    fn with_file_namespace(ns: &str) -> ServiceConfig {
        ServiceConfig {
            namespace: Some(ns.to_string()),
            logging: None,
        }
    }

    #[test]
    fn command_line_namespace_wins_over_file() {
        let cfg = with_file_namespace("from-file");
        assert_eq!(cfg.explicit_namespace(Some("from-cli")), Some("from-cli"));
    }

    #[test]
    fn empty_command_line_namespace_falls_back_to_file() {
        let cfg = with_file_namespace("from-file");
        assert_eq!(cfg.explicit_namespace(Some("")), Some("from-file"));
        assert_eq!(cfg.explicit_namespace(None), Some("from-file"));
    }

    #[test]
    fn without_cli_or_file_namespace_comes_from_environment() {
        let cfg = with_file_namespace("");
        assert_eq!(cfg.explicit_namespace(Some("")), None);

        let ns = resolve_namespace_with(cfg.explicit_namespace(None), |_| Some("from-env".into())).unwrap();
        assert_eq!(ns.name(), "from-env");
        assert_eq!(ns.origin(), NamespaceOrigin::Environment);
    }
}
