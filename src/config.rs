//! Configuration management for chainview

use crate::error::{Result, ViewError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "chainview.toml";
pub const NODE_URL_ENV: &str = "CHAINVIEW_NODE_URL";
pub const BIND_ENV: &str = "CHAINVIEW_BIND";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_node_url")]
    pub url: String,
    /// 0 disables the timeout: a request may hang until the node answers.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: default_node_url(),
            request_timeout_secs: 0,
        }
    }
}

impl NodeConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// How acknowledgments (mining results, registration messages) are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcknowledgeMode {
    /// Wait for the user to confirm before continuing.
    #[default]
    Prompt,
    /// Print and continue immediately (scripts, CI).
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_truncate_len")]
    pub truncate_len: usize,
    #[serde(default)]
    pub acknowledge: AcknowledgeMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            truncate_len: default_truncate_len(),
            acknowledge: AcknowledgeMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_node_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_truncate_len() -> usize {
    crate::wallet::DEFAULT_TRUNCATE_LEN
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Load `chainview.toml` from the working directory.
pub fn load_config() -> Result<Config> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Load configuration from `path`, falling back to defaults when the file is
/// absent, then apply environment overrides and validate.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let mut config: Config = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    if let Ok(url) = std::env::var(NODE_URL_ENV) {
        config.node.url = url;
    }
    if let Ok(bind) = std::env::var(BIND_ENV) {
        config.web.bind = bind;
    }

    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.node.url).map_err(|e| {
            ViewError::ConfigError(format!("node.url {:?} is not a valid URL: {}", self.node.url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ViewError::ConfigError(format!(
                "node.url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.display.truncate_len == 0 {
            return Err(ViewError::ConfigError(
                "display.truncate_len must be greater than zero".to_string(),
            ));
        }

        if self.web.bind.is_empty() {
            return Err(ViewError::ConfigError("web.bind must be set".to_string()));
        }

        Ok(())
    }
}
