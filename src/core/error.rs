use std::io;
use std::time::Duration;
use thiserror::Error;

/// Unified error type for Jarvis
#[derive(Error, Debug)]
pub enum JarvisError {
    /// Provider API returned something we could not use
    #[error("API error: {0}")]
    Api(String),

    /// Provider rejected the credential (401/403)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Provider refused because of quota or rate limiting (429)
    #[error("Quota exceeded: {0}")]
    Quota(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// A provider call did not finish in time
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A provider could not be set up at startup
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Voice capture produced no usable text
    #[error("Transcription error: {0}")]
    Transcription(String),
}

impl JarvisError {
    /// Maps a non-success HTTP status from a provider to an error kind.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let excerpt: String = body.trim().chars().take(200).collect();
        match status.as_u16() {
            401 | 403 => JarvisError::Auth(format!("HTTP {}: {}", status.as_u16(), excerpt)),
            429 => JarvisError::Quota(format!("HTTP 429: {}", excerpt)),
            _ => JarvisError::Api(format!("HTTP {}: {}", status.as_u16(), excerpt)),
        }
    }
}

impl From<reqwest::Error> for JarvisError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs can carry credentials
        let err = err.without_url();
        if err.is_timeout() {
            JarvisError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            JarvisError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            JarvisError::Api(format!("API returned error status: {}", err))
        } else {
            JarvisError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for JarvisError {
    fn from(err: serde_json::Error) -> Self {
        JarvisError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for JarvisError {
    fn from(err: serde_yml::Error) -> Self {
        JarvisError::Serialization(format!("YAML error: {}", err))
    }
}
