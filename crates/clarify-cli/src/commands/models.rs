//! Models command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, ModelRow};
use clarify_domain::Model;
use clarify_llm::{ModelRegistry, StaticRegistry};

/// Execute the models command.
pub async fn execute_models(
    config: &Config,
    active: Option<&Model>,
    formatter: &Formatter,
) -> Result<()> {
    let rows = model_rows(config, &config.registry(), active).await;
    println!("{}", formatter.format_models(&rows)?);
    Ok(())
}

/// One row per configured model
pub async fn model_rows(
    config: &Config,
    registry: &StaticRegistry,
    active: Option<&Model>,
) -> Vec<ModelRow> {
    let table = config.extractor.cheap_table();
    let mut rows = Vec::new();
    for model in registry.models() {
        rows.push(ModelRow {
            active: active == Some(&model),
            extraction: table.cheap_model_for(&model.provider) == Some(model.id.as_str()),
            credential: registry.api_key(&model).await.is_some(),
            provider: model.provider,
            id: model.id,
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[tokio::test]
    async fn test_rows_mark_active_cheap_and_credentials() {
        let mut config = Config::default();
        config.providers.insert(
            "openai".into(),
            ProviderConfig {
                api_key: Some("sk-test".into()),
                models: vec!["gpt-4o".into(), "gpt-4o-mini".into()],
                ..ProviderConfig::default()
            },
        );
        let active = Model::new("openai", "gpt-4o");
        let rows = model_rows(&config, &config.registry(), Some(&active)).await;

        let find = |id: &str| rows.iter().find(|r| r.id == id).unwrap();
        assert!(find("gpt-4o").active);
        assert!(!find("gpt-4o").extraction);
        assert!(find("gpt-4o-mini").extraction);
        assert!(find("gpt-4o-mini").credential);
        assert!(find("llama3.2").credential);
        assert_eq!(rows[0].provider, "anthropic");
    }
}
