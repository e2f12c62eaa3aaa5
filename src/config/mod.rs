use crate::core::error::JarvisError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant named Jarvis, respond conversationally";

fn default_order() -> Vec<Provider> {
    vec![Provider::OpenAI, Provider::Gemini]
}

fn default_timeout() -> u64 {
    30
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Environment variable holding the default credential.
    pub fn env_key(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Gemini => "GOOGLE_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4.1-mini",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => Err(format!(
                "unknown provider '{}' (expected openai or gemini)",
                other
            )),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fallback priority, primary first.
    #[serde(default = "default_order")]
    pub provider_order: Vec<Provider>,
    /// Upper bound for one provider call.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default)]
    pub providers: HashMap<Provider, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_order: default_order(),
            timeout_secs: default_timeout(),
            system_prompt: default_system_prompt(),
            // Listed so a freshly written file shows every setting
            providers: default_order()
                .into_iter()
                .map(|p| (p, ProviderConfig::default()))
                .collect(),
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jarvis")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn load() -> Result<Config, JarvisError> {
        Self::load_from(&Self::config_path())
    }

    /// Reads the config at `path`, writing a default one when it does not exist.
    pub fn load_from(path: &Path) -> Result<Config, JarvisError> {
        if path.exists() {
            debug!("loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let mut config = serde_yml::from_str::<Config>(&contents)
                .map_err(|e| JarvisError::Config(format!("Parse {}: {}", path.display(), e)))?;
            config.provider_order = dedup_order(&config.provider_order);
            return Ok(config);
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            debug!("could not write default config to {}: {}", path.display(), e);
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), JarvisError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    pub fn provider(&self, provider: Provider) -> ProviderConfig {
        self.providers.get(&provider).cloned().unwrap_or_default()
    }

    /// Replaces the fallback order, dropping repeated entries.
    pub fn set_order(&mut self, order: &[Provider]) {
        self.provider_order = dedup_order(order);
    }
}

fn dedup_order(order: &[Provider]) -> Vec<Provider> {
    let mut seen = Vec::with_capacity(order.len());
    for provider in order {
        if !seen.contains(provider) {
            seen.push(*provider);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_parse_case_insensitively() {
        assert_eq!("OpenAI".parse::<Provider>(), Ok(Provider::OpenAI));
        assert_eq!(" gemini ".parse::<Provider>(), Ok(Provider::Gemini));
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn missing_file_yields_defaults_and_writes_them() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.provider_order, vec![Provider::OpenAI, Provider::Gemini]);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);

        let written = fs::read_to_string(&path).unwrap();
        for key in ["openai:", "gemini:", "api_key:", "base_url:", "model:"] {
            assert!(written.contains(key), "{} missing from:\n{}", key, written);
        }
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.providers.len(), 2);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "provider_order: [gemini, openai, gemini]\nproviders:\n  gemini:\n    model: gemini-1.5-pro\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.provider_order, vec![Provider::Gemini, Provider::OpenAI]);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(
            config.provider(Provider::Gemini).model.as_deref(),
            Some("gemini-1.5-pro")
        );
        assert!(config.provider(Provider::OpenAI).api_key.is_none());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "provider_order: [nonsense]\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, JarvisError::Config(_)));
    }

    #[test]
    fn save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.set_order(&[Provider::Gemini]);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider_order, vec![Provider::Gemini]);
    }
}
