use crate::core::error::JarvisError;
use crate::providers::base_client::HttpClient;
use crate::providers::gemini::types::*;
use crate::providers::{Message, Role};

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self, JarvisError> {
        // Sent as a header so the key never appears in a request URL
        let auth_header = Some(("x-goog-api-key".to_string(), api_key));
        let client = HttpClient::new(base_url, auth_header, None)?;

        Ok(Self { client, model })
    }

    pub async fn generate_content(&self, messages: &[Message]) -> Result<String, JarvisError> {
        let payload = build_payload(messages);
        let response_body = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", self.model),
                &payload,
            )
            .await?;

        let parsed: GeminiResponse = serde_json::from_str(&response_body).map_err(|e| {
            JarvisError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(JarvisError::Api(format!("Gemini blocked the prompt: {}", reason)));
        }

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(JarvisError::Api("No valid response from Gemini".to_string()));
        }
        Ok(text.to_string())
    }
}

fn build_payload(messages: &[Message]) -> GeminiRequest {
    let system_instruction = messages
        .iter()
        .find(|m| m.role == Role::System)
        .map(|m| SystemInstruction {
            parts: vec![GeminiPart {
                text: m.content.clone(),
            }],
        });

    let contents = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| GeminiContentPart {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: m.content.clone(),
            }],
        })
        .collect();

    GeminiRequest {
        contents,
        system_instruction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: String) -> GeminiClient {
        GeminiClient::new(
            uri,
            "g-key".to_string(),
            "gemini-2.0-flash".to_string(),
        )
        .unwrap()
    }

    fn messages() -> Vec<Message> {
        vec![Message::system("Be Jarvis."), Message::user("hello")]
    }

    #[test]
    fn payload_splits_system_instruction() {
        let payload = serde_json::to_value(build_payload(&messages())).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "system_instruction": {"parts": [{"text": "Be Jarvis."}]}
            })
        );
    }

    #[tokio::test]
    async fn joins_candidate_parts() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Hi "}, {"text": "there!"}]}
                }]
            })))
            .mount(&mock_server)
            .await;

        let text = client(mock_server.uri())
            .generate_content(&messages())
            .await
            .unwrap();
        assert_eq!(text, "Hi there!");
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri())
            .generate_content(&messages())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn forbidden_is_auth_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri())
            .generate_content(&messages())
            .await
            .unwrap_err();
        assert!(matches!(err, JarvisError::Auth(_)));
    }

    #[tokio::test]
    async fn transport_failure_does_not_expose_the_key() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9".to_string(),
            "SECRET-GEMINI-KEY".to_string(),
            "gemini-2.0-flash".to_string(),
        )
        .unwrap();

        let err = client.generate_content(&messages()).await.unwrap_err();

        assert!(matches!(err, JarvisError::Network(_)));
        assert!(!err.to_string().contains("SECRET-GEMINI-KEY"));
    }
}
