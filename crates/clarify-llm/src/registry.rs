//! Model registry: which models are known and how to obtain their credentials

use async_trait::async_trait;
use clarify_domain::Model;
use std::collections::BTreeMap;
use tracing::debug;

/// Looks up models and resolves their credentials
#[async_trait]
pub trait ModelRegistry: Send + Sync {
    /// Find a known model
    fn find(&self, provider: &str, id: &str) -> Option<Model>;

    /// Resolve the credential for a model; `None` when no usable credential exists
    async fn api_key(&self, model: &Model) -> Option<String>;
}

/// How a provider's credential is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// The provider needs no credential (local backends)
    NotRequired,
    /// A key given directly
    Literal(String),
    /// A key read from an environment variable at lookup time
    Env(String),
}

impl Credential {
    /// Resolve the credential; empty keys count as missing
    pub fn resolve(&self) -> Option<String> {
        match self {
            Credential::NotRequired => Some(String::new()),
            Credential::Literal(key) => Some(key.clone()).filter(|k| !k.is_empty()),
            Credential::Env(var) => std::env::var(var).ok().filter(|k| !k.trim().is_empty()),
        }
    }
}

/// One configured provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    /// Model ids served by the provider
    pub models: Vec<String>,
    /// How to obtain the provider's credential
    pub credential: Credential,
}

impl ProviderEntry {
    /// Create an entry
    pub fn new<I, S>(models: I, credential: Credential) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            credential,
        }
    }
}

/// A registry built once from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    providers: BTreeMap<String, ProviderEntry>,
}

impl StaticRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a provider
    pub fn insert(&mut self, provider: impl Into<String>, entry: ProviderEntry) {
        self.providers.insert(provider.into(), entry);
    }

    /// Builder form of [`StaticRegistry::insert`]
    pub fn with_provider(mut self, provider: impl Into<String>, entry: ProviderEntry) -> Self {
        self.insert(provider, entry);
        self
    }

    /// All known models, grouped by provider in name order
    pub fn models(&self) -> Vec<Model> {
        self.providers
            .iter()
            .flat_map(|(provider, entry)| {
                entry.models.iter().map(move |id| Model::new(provider.as_str(), id.as_str()))
            })
            .collect()
    }
}

#[async_trait]
impl ModelRegistry for StaticRegistry {
    fn find(&self, provider: &str, id: &str) -> Option<Model> {
        self.providers
            .get(provider)
            .filter(|entry| entry.models.iter().any(|m| m == id))
            .map(|_| Model::new(provider, id))
    }

    async fn api_key(&self, model: &Model) -> Option<String> {
        let key = self.providers.get(&model.provider)?.credential.resolve();
        if key.is_none() {
            debug!(model = %model, "No credential available");
        }
        key
    }
}
