use crate::core::error::JarvisError;
use async_trait::async_trait;

pub mod adapter;
pub mod base_client;
pub mod factory;
pub mod fallback;
pub mod gemini;
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat backend speaking one provider's wire format.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn get_response(&self, messages: &[Message]) -> Result<String, JarvisError>;

    fn model(&self) -> &str;
}

/// Outcome of asking one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResult {
    Success(String),
    Failure(String),
}

/// Uniform boundary the fallback dispatcher talks to.
///
/// Implementations never return errors; every problem is folded into
/// [`ProviderResult::Failure`] with a short readable reason.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn invoke(&self, utterance: &str, system_prompt: &str) -> ProviderResult;
}

pub use adapter::ChatAdapter;
pub use factory::ProviderFactory;
pub use fallback::{FallbackDispatcher, ProviderFailure};
