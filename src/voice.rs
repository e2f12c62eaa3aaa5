//! Speech-to-text for recorded utterances.
//!
//! Capture itself lives outside the assistant; this only turns one audio file
//! into at most one utterance string.

use crate::config::Provider;
use crate::core::error::JarvisError;
use crate::providers::base_client::HttpClient;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Returns the transcribed text. Silence or an empty result is a
    /// [`JarvisError::Transcription`], never an empty utterance.
    async fn transcribe(&self, audio: &Path) -> Result<String, JarvisError>;
}

/// OpenAI Whisper (`/audio/transcriptions`).
pub struct WhisperTranscriber {
    client: HttpClient,
    model: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

impl WhisperTranscriber {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self, JarvisError> {
        let base_url = base_url.unwrap_or_else(|| Provider::OpenAI.default_base_url().to_string());
        let auth_header = Some(("Authorization".to_string(), format!("Bearer {}", api_key)));
        Ok(Self {
            client: HttpClient::new(base_url, auth_header, None)?,
            model: "whisper-1".to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String, JarvisError> {
        let bytes = tokio::fs::read(audio).await.map_err(|e| {
            JarvisError::Transcription(format!("cannot read {}: {}", audio.display(), e))
        })?;

        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());
        debug!(file = %file_name, size = bytes.len(), "transcribing audio");

        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", Part::bytes(bytes).file_name(file_name));

        let body = tokio::time::timeout(
            self.timeout,
            self.client.post_multipart("audio/transcriptions", form),
        )
        .await
        .map_err(|_| JarvisError::Timeout(self.timeout))
        .and_then(|result| result)
        .map_err(|e| JarvisError::Transcription(e.to_string()))?;
        let parsed: TranscriptionResponse = serde_json::from_str(&body)?;

        let text = parsed.text.trim();
        if text.is_empty() {
            return Err(JarvisError::Transcription("no speech recognized".to_string()));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn transcribe_with(body: serde_json::Value) -> Result<String, JarvisError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("Authorization", "Bearer k"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("clip.wav");
        std::fs::write(&audio, b"RIFF....WAVE").unwrap();

        let transcriber =
            WhisperTranscriber::new("k".to_string(), Some(mock_server.uri()), Duration::from_secs(5))
                .unwrap();
        transcriber.transcribe(&audio).await
    }

    #[tokio::test]
    async fn returns_trimmed_text() {
        let text = transcribe_with(serde_json::json!({"text": " what time is it \n"}))
            .await
            .unwrap();
        assert_eq!(text, "what time is it");
    }

    #[tokio::test]
    async fn silence_is_a_transcription_error() {
        let err = transcribe_with(serde_json::json!({"text": ""})).await.unwrap_err();
        assert!(matches!(err, JarvisError::Transcription(_)));
    }

    #[tokio::test]
    async fn missing_file_is_a_transcription_error() {
        let transcriber = WhisperTranscriber::new(
            "k".to_string(),
            Some("http://127.0.0.1:9".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();

        let err = transcriber
            .transcribe(Path::new("/definitely/not/here.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, JarvisError::Transcription(_)));
    }
}
