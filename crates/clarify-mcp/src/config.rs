//! Server settings read from the shared clarify configuration file

use crate::error::McpError;
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "CLARIFY_CONFIG";

/// Settings the server honors; everything else in the file is ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Colorize the interview
    pub color: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    ui: UiSection,
}

#[derive(Debug, Deserialize)]
struct UiSection {
    #[serde(default = "default_color")]
    color: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl ServerConfig {
    /// Parse the `[ui]` section of a configuration document
    pub fn from_toml(content: &str) -> Result<Self, McpError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|e| McpError::Config(e.to_string()))?;
        Ok(Self {
            color: file.ui.color,
        })
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, McpError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from the file named by `CLARIFY_CONFIG`, if set
    pub fn from_env() -> Result<Self, McpError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
