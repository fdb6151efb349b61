//! Cost-aware choice of the extraction model

use clarify_domain::{CheapModelTable, Model};
use clarify_llm::ModelRegistry;
use tracing::debug;

/// Pick the cheapest adequate model for extraction
///
/// Falls back to `current` whenever the provider has no cheap entry, the
/// current model is already cheap, the registry does not know the cheap
/// model, or no credential resolves for it. Never fails.
pub async fn select_extraction_model<R>(
    current: &Model,
    table: &CheapModelTable,
    registry: &R,
) -> Model
where
    R: ModelRegistry + ?Sized,
{
    let Some(cheap_id) = table.cheap_model_for(&current.provider) else {
        debug!(model = %current, "No cheap model for provider; keeping current");
        return current.clone();
    };

    if current.is_cheap_tier() {
        debug!(model = %current, "Already on a cheap tier");
        return current.clone();
    }

    let Some(cheap) = registry.find(&current.provider, cheap_id) else {
        debug!(model = %current, cheap = cheap_id, "Cheap model not in registry");
        return current.clone();
    };

    if registry.api_key(&cheap).await.is_none() {
        debug!(model = %cheap, "No credential for cheap model; keeping current");
        return current.clone();
    }

    debug!(from = %current, to = %cheap, "Using cheap extraction model");
    cheap
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_llm::{Credential, ProviderEntry, StaticRegistry};

    fn registry(credential: Credential) -> StaticRegistry {
        StaticRegistry::new()
            .with_provider(
                "anthropic",
                ProviderEntry::new(["claude-sonnet-4-5", "claude-haiku-4-5"], credential),
            )
            .with_provider(
                "ollama",
                ProviderEntry::new(["llama3.2"], Credential::NotRequired),
            )
    }

    fn select(current: &Model, registry: &StaticRegistry) -> Model {
        tokio_test::block_on(select_extraction_model(
            current,
            &CheapModelTable::default(),
            registry,
        ))
    }

    #[test]
    fn test_swaps_to_cheap_model() {
        let current = Model::new("anthropic", "claude-sonnet-4-5");
        let selected = select(&current, &registry(Credential::Literal("sk".into())));
        assert_eq!(selected, Model::new("anthropic", "claude-haiku-4-5"));
    }

    #[test]
    fn test_keeps_cheap_current_model() {
        // "haiku" is already cheap even though an entry exists for the provider
        let current = Model::new("anthropic", "claude-3-5-haiku-latest");
        let selected = select(&current, &registry(Credential::Literal("sk".into())));
        assert_eq!(selected, current);
    }

    #[test]
    fn test_provider_without_entry_keeps_current() {
        let current = Model::new("ollama", "llama3.2");
        assert_eq!(select(&current, &registry(Credential::NotRequired)), current);
    }

    #[test]
    fn test_missing_credential_keeps_current() {
        let current = Model::new("anthropic", "claude-sonnet-4-5");
        let selected = select(&current, &registry(Credential::Literal(String::new())));
        assert_eq!(selected, current);
    }

    #[test]
    fn test_unknown_cheap_model_keeps_current() {
        let current = Model::new("openai", "gpt-4o");
        let registry = StaticRegistry::new().with_provider(
            "openai",
            ProviderEntry::new(["gpt-4o"], Credential::Literal("sk".into())),
        );
        assert_eq!(select(&current, &registry), current);
    }

    #[test]
    fn test_override_table_is_used() {
        let current = Model::new("ollama", "llama3.2");
        let registry = StaticRegistry::new().with_provider(
            "ollama",
            ProviderEntry::new(["llama3.2", "llama3.2:1b"], Credential::NotRequired),
        );
        let table = CheapModelTable::default().with_overrides([("ollama", "llama3.2:1b")]);
        let selected =
            tokio_test::block_on(select_extraction_model(&current, &table, &registry));
        assert_eq!(selected, Model::new("ollama", "llama3.2:1b"));
    }
}
