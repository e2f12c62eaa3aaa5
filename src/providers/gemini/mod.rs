use crate::config::Provider;
use crate::core::error::JarvisError;
use crate::providers::{LLMProvider, Message};
use async_trait::async_trait;

mod client;
mod types;

use client::GeminiClient;

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Result<Self, JarvisError> {
        Self::with_endpoint(
            Provider::Gemini.default_base_url().to_string(),
            api_key,
            model,
        )
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        model: String,
    ) -> Result<Self, JarvisError> {
        Ok(Self {
            client: GeminiClient::new(endpoint, api_key, model)?,
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, JarvisError> {
        self.client.generate_content(messages).await
    }

    fn model(&self) -> &str {
        &self.client.model
    }
}
