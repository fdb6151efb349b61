//! Completion models and the cheap-tier lookup table

use std::collections::BTreeMap;
use std::fmt;

/// Name fragments that mark a model as already belonging to a cheap tier
pub const CHEAP_TIER_MARKERS: &[&str] = &["haiku", "mini", "flash"];

/// A completion model, identified by provider and model id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    /// Provider key (e.g. "anthropic", "openai", "ollama")
    pub provider: String,

    /// Provider-specific model id (e.g. "claude-sonnet-4-5")
    pub id: String,
}

impl Model {
    /// Create a model reference
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
        }
    }

    /// Parse a `provider/id` reference
    ///
    /// Only the first `/` separates the provider, so ids may contain slashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use clarify_domain::Model;
    ///
    /// let model = Model::parse("ollama/library/llama3").unwrap();
    /// assert_eq!(model.provider, "ollama");
    /// assert_eq!(model.id, "library/llama3");
    /// assert!(Model::parse("no-provider").is_none());
    /// ```
    pub fn parse(reference: &str) -> Option<Self> {
        let (provider, id) = reference.split_once('/')?;
        let (provider, id) = (provider.trim(), id.trim());
        if provider.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(provider, id))
    }

    /// Whether the model id already signals a cheap tier (case-insensitive)
    pub fn is_cheap_tier(&self) -> bool {
        let id = self.id.to_lowercase();
        CHEAP_TIER_MARKERS.iter().any(|marker| id.contains(marker))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.id)
    }
}

/// Immutable provider → cheap extraction model lookup
///
/// Built once at startup (defaults plus configuration overrides) and passed
/// into the model selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheapModelTable {
    entries: BTreeMap<String, String>,
}

impl CheapModelTable {
    /// Build a table from explicit entries
    pub fn new<I, P, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, M)>,
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(p, m)| (p.into(), m.into()))
                .collect(),
        }
    }

    /// Return a copy with `overrides` replacing or adding entries
    pub fn with_overrides<I, P, M>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (P, M)>,
        P: Into<String>,
        M: Into<String>,
    {
        let mut entries = self.entries.clone();
        for (provider, model) in overrides {
            entries.insert(provider.into(), model.into());
        }
        Self { entries }
    }

    /// Cheap model id for a provider, if one is known
    pub fn cheap_model_for(&self, provider: &str) -> Option<&str> {
        self.entries.get(provider).map(String::as_str)
    }
}

impl Default for CheapModelTable {
    fn default() -> Self {
        Self::new([
            ("anthropic", "claude-haiku-4-5"),
            ("github-copilot", "claude-haiku-4.5"),
            ("openai", "gpt-4o-mini"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = CheapModelTable::default();
        assert_eq!(table.cheap_model_for("anthropic"), Some("claude-haiku-4-5"));
        assert_eq!(table.cheap_model_for("github-copilot"), Some("claude-haiku-4.5"));
        assert_eq!(table.cheap_model_for("openai"), Some("gpt-4o-mini"));
        assert_eq!(table.cheap_model_for("ollama"), None);
    }

    #[test]
    fn test_overrides() {
        let table = CheapModelTable::default()
            .with_overrides([("ollama", "llama3.2:1b"), ("openai", "gpt-4.1-nano")]);
        assert_eq!(table.cheap_model_for("ollama"), Some("llama3.2:1b"));
        assert_eq!(table.cheap_model_for("openai"), Some("gpt-4.1-nano"));
        // Original untouched
        assert_eq!(CheapModelTable::default().cheap_model_for("ollama"), None);
    }

    #[test]
    fn test_cheap_tier_detection() {
        assert!(Model::new("anthropic", "claude-3-5-HAIKU-latest").is_cheap_tier());
        assert!(Model::new("openai", "gpt-4o-mini").is_cheap_tier());
        assert!(Model::new("google", "gemini-2.0-flash").is_cheap_tier());
        assert!(!Model::new("anthropic", "claude-opus-4").is_cheap_tier());
    }

    #[test]
    fn test_parse_and_display() {
        let model = Model::parse("anthropic/claude-sonnet-4-5").unwrap();
        assert_eq!(model, Model::new("anthropic", "claude-sonnet-4-5"));
        assert_eq!(model.to_string(), "anthropic/claude-sonnet-4-5");
        assert!(Model::parse("/id").is_none());
        assert!(Model::parse("provider/").is_none());
    }
}
