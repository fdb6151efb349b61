//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use clarify_domain::Model;
use clarify_extractor::ExtractorConfig;
use clarify_llm::{Credential, ProviderEntry, ProviderRouter, StaticRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelRef>,

    /// Configured providers, by name
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,

    /// Question extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Display settings
    #[serde(default)]
    pub ui: Settings,
}

/// A model named in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    /// Provider name
    pub provider: String,
    /// Model id
    pub id: String,
}

impl From<&ModelRef> for Model {
    fn from(model: &ModelRef) -> Self {
        Model::new(model.provider.as_str(), model.id.as_str())
    }
}

/// One provider's connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key given directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Model ids served by this provider
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// How to obtain this provider's key
    ///
    /// A literal key wins over an environment variable. Without either, local
    /// `ollama` needs none and every other provider reads `<NAME>_API_KEY`.
    pub fn credential(&self, provider: &str) -> Credential {
        if let Some(key) = &self.api_key {
            return Credential::Literal(key.clone());
        }
        if let Some(var) = &self.api_key_env {
            return Credential::Env(var.clone());
        }
        if provider == "ollama" {
            return Credential::NotRequired;
        }
        Credential::Env(format!(
            "{}_API_KEY",
            provider.to_uppercase().replace('-', "_")
        ))
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Chat history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Formatted transcript
    Text,
    /// JSON format
    Json,
    /// Table format
    Table,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".clarify").join("config.toml"))
    }

    /// Parse and validate a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.extractor.validate()?;
        Ok(config)
    }

    /// Serialize to a configuration document.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load configuration from `path`, or the default path.
    ///
    /// A missing file at the default path is created with defaults; a missing
    /// explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    CliError::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&contents)
            }
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_toml(&fs::read_to_string(&path)?)
                } else {
                    let config = Self::default();
                    config.save_to(&path).ok();
                    Ok(config)
                }
            }
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// The active model; `reference` (provider/id) overrides the configured one.
    pub fn active_model(&self, reference: Option<&str>) -> Result<Option<Model>> {
        match reference {
            Some(reference) => Model::parse(reference).map(Some).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Invalid model '{}'. Expected 'provider/id'",
                    reference
                ))
            }),
            None => Ok(self.model.as_ref().map(Model::from)),
        }
    }

    /// Model registry over the configured providers.
    pub fn registry(&self) -> StaticRegistry {
        let mut registry = StaticRegistry::new();
        for (name, provider) in &self.providers {
            registry.insert(
                name.as_str(),
                ProviderEntry::new(provider.models.iter().cloned(), provider.credential(name)),
            );
        }
        registry
    }

    /// Completion router with one backend per configured provider.
    pub fn router(&self) -> ProviderRouter {
        let mut router = ProviderRouter::new();
        for (name, provider) in &self.providers {
            router.register_provider(name, provider.base_url.as_deref());
        }
        router
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            "anthropic".to_string(),
            ProviderConfig {
                api_key_env: Some("ANTHROPIC_API_KEY".to_string()),
                models: vec!["claude-sonnet-4-5".into(), "claude-haiku-4-5".into()],
                ..ProviderConfig::default()
            },
        );
        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                api_key_env: Some("OPENAI_API_KEY".to_string()),
                models: vec!["gpt-4o".into(), "gpt-4o-mini".into()],
                ..ProviderConfig::default()
            },
        );
        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                models: vec!["llama3.2".into()],
                ..ProviderConfig::default()
            },
        );

        Self {
            model: Some(ModelRef {
                provider: "anthropic".to_string(),
                id: "claude-sonnet-4-5".to_string(),
            }),
            providers,
            extractor: ExtractorConfig::default(),
            ui: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_history_size() -> usize {
    1000
}
