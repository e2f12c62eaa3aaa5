use super::{LLMProvider, Message, Role};
use crate::config::Provider;
use crate::core::error::JarvisError;
use crate::providers::base_client::HttpClient;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
}

#[derive(Serialize)]
struct ChatCompletionMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAIProvider {
    client: HttpClient,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String, model: String) -> Result<Self, JarvisError> {
        Self::with_endpoint(
            Provider::OpenAI.default_base_url().to_string(),
            api_key,
            model,
        )
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        model: String,
    ) -> Result<Self, JarvisError> {
        let auth_header = Some(("Authorization".to_string(), format!("Bearer {}", api_key)));
        Ok(Self {
            client: HttpClient::new(endpoint, auth_header, None)?,
            model,
        })
    }
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, JarvisError> {
        let req_messages: Vec<ChatCompletionMessage> = messages
            .iter()
            .map(|m| ChatCompletionMessage {
                role: match m.role {
                    Role::System => "system".to_string(),
                    Role::User => "user".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: req_messages,
        };

        let response_body = self.client.post("chat/completions", &payload).await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&response_body)?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| JarvisError::Api("No choices in API response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            return Err(JarvisError::Api("Empty completion received from API".to_string()));
        }

        Ok(content.to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(uri: String) -> OpenAIProvider {
        OpenAIProvider::with_endpoint(
            uri,
            "test-key".to_string(),
            "gpt-4.1-mini".to_string(),
        )
        .unwrap()
    }

    fn messages() -> Vec<Message> {
        vec![Message::system("You are Jarvis."), Message::user("hello")]
    }

    #[tokio::test]
    async fn returns_first_choice() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4.1-mini",
                "messages": [
                    {"role": "system", "content": "You are Jarvis."},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "  Hi there!\n"}}]
            })))
            .mount(&mock_server)
            .await;

        let text = provider(mock_server.uri())
            .get_response(&messages())
            .await
            .unwrap();
        assert_eq!(text, "Hi there!");
    }

    #[tokio::test]
    async fn unauthorized_is_auth_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .mount(&mock_server)
            .await;

        let err = provider(mock_server.uri())
            .get_response(&messages())
            .await
            .unwrap_err();
        assert!(matches!(err, JarvisError::Auth(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&mock_server)
            .await;

        let err = provider(mock_server.uri())
            .get_response(&messages())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No choices"));
    }

    #[tokio::test]
    async fn malformed_body_is_serialization_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = provider(mock_server.uri())
            .get_response(&messages())
            .await
            .unwrap_err();
        assert!(matches!(err, JarvisError::Serialization(_)));
    }
}
