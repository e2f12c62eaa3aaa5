use super::{LLMProvider, Message, ProviderAdapter, ProviderResult};
use crate::core::error::JarvisError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Wraps an [`LLMProvider`] so its errors stop here.
pub struct ChatAdapter {
    name: String,
    provider: Box<dyn LLMProvider>,
    timeout: Duration,
}

impl ChatAdapter {
    pub fn new(name: impl Into<String>, provider: Box<dyn LLMProvider>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            provider,
            timeout,
        }
    }

    async fn ask(&self, utterance: &str, system_prompt: &str) -> Result<String, JarvisError> {
        let messages = [Message::system(system_prompt), Message::user(utterance)];

        debug!(
            provider = %self.name,
            model = self.provider.model(),
            "sending utterance"
        );

        let text = tokio::time::timeout(self.timeout, self.provider.get_response(&messages))
            .await
            .map_err(|_| JarvisError::Timeout(self.timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(JarvisError::Api("empty completion".to_string()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl ProviderAdapter for ChatAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, utterance: &str, system_prompt: &str) -> ProviderResult {
        match self.ask(utterance, system_prompt).await {
            Ok(text) => ProviderResult::Success(text),
            Err(e) => ProviderResult::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Role;
    use std::sync::Mutex;

    struct Scripted {
        reply: Result<&'static str, fn() -> JarvisError>,
        delay: Duration,
        seen: Mutex<Vec<Message>>,
    }

    impl Scripted {
        fn ok(text: &'static str) -> Self {
            Self {
                reply: Ok(text),
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for Scripted {
        async fn get_response(&self, messages: &[Message]) -> Result<String, JarvisError> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(make) => Err(make()),
            }
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn success_passes_text_through() {
        let adapter = ChatAdapter::new("a", Box::new(Scripted::ok(" Hi there! ")), Duration::from_secs(1));
        assert_eq!(
            adapter.invoke("hello", "prompt").await,
            ProviderResult::Success("Hi there!".to_string())
        );
    }

    #[tokio::test]
    async fn sends_system_prompt_then_utterance() {
        let scripted = std::sync::Arc::new(Scripted::ok("ok"));

        struct Shared(std::sync::Arc<Scripted>);

        #[async_trait]
        impl LLMProvider for Shared {
            async fn get_response(&self, messages: &[Message]) -> Result<String, JarvisError> {
                self.0.get_response(messages).await
            }

            fn model(&self) -> &str {
                "shared"
            }
        }

        let adapter = ChatAdapter::new("a", Box::new(Shared(scripted.clone())), Duration::from_secs(1));
        adapter.invoke("hello", "You are Jarvis").await;

        let seen = scripted.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "You are Jarvis");
        assert_eq!(seen[1].role, Role::User);
        assert_eq!(seen[1].content, "hello");
    }

    #[tokio::test]
    async fn errors_become_failures() {
        let provider = Scripted {
            reply: Err(|| JarvisError::Auth("HTTP 401: bad key".to_string())),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        };
        let adapter = ChatAdapter::new("a", Box::new(provider), Duration::from_secs(1));

        match adapter.invoke("hello", "prompt").await {
            ProviderResult::Failure(reason) => assert!(reason.contains("Authentication failed")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_completion_is_a_failure() {
        let adapter = ChatAdapter::new("a", Box::new(Scripted::ok("   ")), Duration::from_secs(1));
        assert!(matches!(
            adapter.invoke("hello", "prompt").await,
            ProviderResult::Failure(_)
        ));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let provider = Scripted {
            reply: Ok("too late"),
            delay: Duration::from_secs(10),
            seen: Mutex::new(Vec::new()),
        };
        let adapter = ChatAdapter::new("a", Box::new(provider), Duration::from_millis(20));

        assert_eq!(
            adapter.invoke("hello", "prompt").await,
            ProviderResult::Failure("request timed out after 20ms".to_string())
        );
    }

    #[tokio::test]
    async fn slow_http_endpoint_reports_the_configured_timeout() {
        use crate::providers::openai::OpenAIProvider;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(serde_json::json!({
                        "choices": [{"message": {"content": "too late"}}]
                    })),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_endpoint(
            mock_server.uri(),
            "k".to_string(),
            "gpt-4.1-mini".to_string(),
        )
        .unwrap();
        let adapter = ChatAdapter::new("openai", Box::new(provider), Duration::from_secs(1));

        assert_eq!(
            adapter.invoke("hello", "prompt").await,
            ProviderResult::Failure("request timed out after 1s".to_string())
        );
    }
}
