use std::path::Path;

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{LoggingConfig, ServiceConfig};

/// Load config from a YAML file, expanding `${VAR}` and `${VAR:default}` first.
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path.display()))?;

    let expanded = expand_env_vars(&content)?;
    parse_config(&expanded).map_err(|e| anyhow!("Invalid config format: {}", e))
}

pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    // an empty file is a valid "all defaults" config
    let mut service_config: ServiceConfig = if content.trim().is_empty() {
        ServiceConfig::default()
    } else {
        serde_yaml::from_str(content).inspect_err(|e| {
            error!("parse config error: {}", e);
        })?
    };

    // Apply defaults
    if service_config.logging.is_none() {
        service_config.logging = Some(LoggingConfig::default());
    }
    debug!(namespace = ?service_config.namespace(), "config parsed");

    Ok(service_config)
}

fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}
