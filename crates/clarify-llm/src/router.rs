//! Provider router: dispatches a completion to the backend registered for
//! the model's provider.

use crate::types::{CompletionOptions, CompletionRequest, CompletionResponse};
use crate::{AnthropicBackend, CompletionBackend, LlmError, OllamaBackend, OpenAiBackend};
use async_trait::async_trait;
use clarify_domain::Model;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Wire protocol spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Ollama `/api/chat`
    Ollama,
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI-compatible chat completions
    OpenAi,
}

impl ProviderKind {
    /// Protocol for a well-known provider name; unknown names speak OpenAI
    pub fn for_provider(name: &str) -> Self {
        match name {
            "ollama" => ProviderKind::Ollama,
            "anthropic" => ProviderKind::Anthropic,
            _ => ProviderKind::OpenAi,
        }
    }

    /// Default base URL for a well-known provider name
    pub fn default_base_url(provider: &str) -> &'static str {
        match provider {
            "ollama" => crate::ollama::DEFAULT_ENDPOINT,
            "anthropic" => crate::anthropic::DEFAULT_BASE_URL,
            "github-copilot" => "https://api.githubcopilot.com",
            "openrouter" => "https://openrouter.ai/api/v1",
            _ => crate::openai::DEFAULT_BASE_URL,
        }
    }

    /// Build a backend of this kind
    pub fn build_backend(self, base_url: &str) -> Arc<dyn CompletionBackend> {
        match self {
            ProviderKind::Ollama => Arc::new(OllamaBackend::new(base_url)),
            ProviderKind::Anthropic => Arc::new(AnthropicBackend::new(base_url)),
            ProviderKind::OpenAi => Arc::new(OpenAiBackend::new(base_url)),
        }
    }
}

/// Routes completion requests to the correct backend
#[derive(Default, Clone)]
pub struct ProviderRouter {
    backends: HashMap<String, Arc<dyn CompletionBackend>>,
}

impl ProviderRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend for a provider name
    pub fn register(&mut self, provider: impl Into<String>, backend: Arc<dyn CompletionBackend>) {
        self.backends.insert(provider.into(), backend);
    }

    /// Register a network backend for `provider`, picking the protocol by name
    pub fn register_provider(&mut self, provider: &str, base_url: Option<&str>) {
        let kind = ProviderKind::for_provider(provider);
        let base_url = base_url.unwrap_or_else(|| ProviderKind::default_base_url(provider));
        self.register(provider, kind.build_backend(base_url));
    }

    /// Registered provider names, sorted
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl CompletionBackend for ProviderRouter {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let backend = self
            .backends
            .get(&model.provider)
            .ok_or_else(|| LlmError::UnknownProvider(model.provider.clone()))?;
        debug!(model = %model, "Routing completion");
        backend.complete(model, request, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;
    use crate::MockBackend;

    #[test]
    fn test_provider_kind() {
        assert_eq!(ProviderKind::for_provider("ollama"), ProviderKind::Ollama);
        assert_eq!(ProviderKind::for_provider("anthropic"), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::for_provider("openai"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::for_provider("github-copilot"), ProviderKind::OpenAi);
        assert_eq!(
            ProviderKind::default_base_url("anthropic"),
            "https://api.anthropic.com"
        );
    }

    #[tokio::test]
    async fn test_routes_by_provider() {
        let mut router = ProviderRouter::new();
        router.register("a", Arc::new(MockBackend::new("from a")));
        router.register("b", Arc::new(MockBackend::new("from b")));

        let request = CompletionRequest::new("", vec![Message::user("hi")]);
        let options = CompletionOptions::default();
        let a = router.complete(&Model::new("a", "m"), &request, &options).await.unwrap();
        let b = router.complete(&Model::new("b", "m"), &request, &options).await.unwrap();
        assert_eq!(a.text(), "from a");
        assert_eq!(b.text(), "from b");
        assert_eq!(router.providers(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let router = ProviderRouter::new();
        let request = CompletionRequest::new("", vec![Message::user("hi")]);
        let result = router
            .complete(&Model::new("nope", "m"), &request, &CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(LlmError::UnknownProvider(p)) if p == "nope"));
    }

    #[test]
    fn test_register_provider() {
        let mut router = ProviderRouter::new();
        router.register_provider("ollama", None);
        router.register_provider("openai", Some("http://localhost:8080/v1"));
        assert_eq!(router.providers(), vec!["ollama", "openai"]);
    }
}
