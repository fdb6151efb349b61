//! Configuration for the Extractor

use crate::error::ExtractorError;
use clarify_domain::CheapModelTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Upper bound on one extraction call (seconds); expiry cancels the call.
    /// Zero disables the deadline.
    pub extraction_timeout_secs: u64,

    /// Provider → cheap model overrides, layered over the built-in table
    pub cheap_models: BTreeMap<String, String>,
}

impl ExtractorConfig {
    /// The extraction deadline, or `None` when `extraction_timeout_secs` is 0
    pub fn extraction_timeout(&self) -> Option<Duration> {
        match self.extraction_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// The built-in cheap-model table with this configuration's overrides applied
    pub fn cheap_table(&self) -> CheapModelTable {
        CheapModelTable::default().with_overrides(self.cheap_models.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if let Some((provider, _)) = self.cheap_models.iter().find(|(_, m)| m.trim().is_empty()) {
            return Err(ExtractorError::Config(format!(
                "cheap model for provider '{}' is empty",
                provider
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            extraction_timeout_secs: 120,
            cheap_models: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = ExtractorConfig {
            extraction_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction_timeout(), None);
    }

    #[test]
    fn test_empty_cheap_model_rejected() {
        let mut config = ExtractorConfig::default();
        config.cheap_models.insert("ollama".into(), "  ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ExtractorConfig::default();
        config.cheap_models.insert("ollama".into(), "llama3.2:1b".into());
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("extraction_timeout_secs = 30").unwrap();
        assert_eq!(parsed.extraction_timeout_secs, 30);
        assert_eq!(parsed.max_text_length, 50_000);
        assert!(parsed.cheap_models.is_empty());
    }

    #[test]
    fn test_cheap_table_applies_overrides() {
        let parsed = ExtractorConfig::from_toml(
            "[cheap_models]\nopenai = \"gpt-4.1-nano\"\nollama = \"llama3.2:1b\"\n",
        )
        .unwrap();
        let table = parsed.cheap_table();
        assert_eq!(table.cheap_model_for("openai"), Some("gpt-4.1-nano"));
        assert_eq!(table.cheap_model_for("ollama"), Some("llama3.2:1b"));
        assert_eq!(table.cheap_model_for("anthropic"), Some("claude-haiku-4-5"));
    }
}
