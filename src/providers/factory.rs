use crate::config::{Config, Provider, ProviderConfig};
use crate::core::error::JarvisError;
use crate::credentials::{KeyPrompt, resolve_api_key};
use crate::providers::{
    ChatAdapter, LLMProvider, ProviderAdapter, gemini::GeminiProvider, openai::OpenAIProvider,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

type ProviderCreator = Box<
    dyn Fn(&ProviderConfig, String) -> Result<Box<dyn LLMProvider>, JarvisError> + Send + Sync,
>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators = HashMap::new();

        creators.insert(
            Provider::OpenAI,
            Box::new(
                |config: &ProviderConfig,
                 api_key: String|
                 -> Result<Box<dyn LLMProvider>, JarvisError> {
                let model = config
                    .model
                    .clone()
                    .unwrap_or_else(|| Provider::OpenAI.default_model().to_string());
                let provider = match &config.base_url {
                    Some(base_url) => {
                        OpenAIProvider::with_endpoint(base_url.clone(), api_key, model)?
                    }
                    None => OpenAIProvider::new(api_key, model)?,
                };
                Ok(Box::new(provider) as Box<dyn LLMProvider>)
            }) as ProviderCreator,
        );

        creators.insert(
            Provider::Gemini,
            Box::new(
                |config: &ProviderConfig,
                 api_key: String|
                 -> Result<Box<dyn LLMProvider>, JarvisError> {
                let model = config
                    .model
                    .clone()
                    .unwrap_or_else(|| Provider::Gemini.default_model().to_string());
                let provider = match &config.base_url {
                    Some(base_url) => {
                        GeminiProvider::with_endpoint(base_url.clone(), api_key, model)?
                    }
                    None => GeminiProvider::new(api_key, model)?,
                };
                Ok(Box::new(provider) as Box<dyn LLMProvider>)
            }) as ProviderCreator,
        );

        Self { creators }
    }

    pub fn create(
        &self,
        provider: Provider,
        config: &ProviderConfig,
        api_key: String,
    ) -> Result<Box<dyn LLMProvider>, JarvisError> {
        self.creators
            .get(&provider)
            .ok_or_else(|| JarvisError::Config(format!("Provider not found: {}", provider)))
            .and_then(|creator| creator(config, api_key))
    }

    /// Builds the adapters for `config.provider_order`, leaving out every
    /// provider that has no credential or fails to initialize.
    pub fn build_adapters<E>(
        &self,
        config: &Config,
        env: E,
        prompt: &mut dyn KeyPrompt,
    ) -> Vec<Box<dyn ProviderAdapter>>
    where
        E: Fn(&str) -> Option<String>,
    {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let mut adapters: Vec<Box<dyn ProviderAdapter>> = Vec::new();

        for &provider in &config.provider_order {
            let provider_config = config.provider(provider);

            let Some(api_key) =
                resolve_api_key(provider, provider_config.api_key.as_deref(), &env, prompt)
            else {
                warn!("{} skipped: no API key (set {})", provider, provider.env_key());
                continue;
            };

            match self.create(provider, &provider_config, api_key) {
                Ok(client) => adapters.push(Box::new(ChatAdapter::new(
                    provider.name(),
                    client,
                    timeout,
                ))),
                Err(e) => warn!("{} skipped: {}", provider, e),
            }
        }

        info!(
            providers = ?adapters.iter().map(|a| a.name()).collect::<Vec<_>>(),
            "provider fallback order"
        );
        adapters
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}
