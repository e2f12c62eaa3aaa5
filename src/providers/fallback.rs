//! Ordered first-success-wins fallback across the configured providers.
//!
//! Providers are tried one after another in priority order, each exactly once
//! per dispatch. There is no racing and no retry, so a billed API is never hit
//! twice for the same utterance.

use super::{ProviderAdapter, ProviderResult};
use tracing::{debug, warn};

pub const NO_PROVIDER_CONFIGURED: &str = "no provider configured";

/// One failed attempt recorded during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub reason: String,
}

/// Everything a single dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub result: ProviderResult,
    /// Name of the provider that answered, if any did.
    pub answered_by: Option<String>,
    /// Failed attempts in the order they were made.
    pub failures: Vec<ProviderFailure>,
}

pub struct FallbackDispatcher {
    providers: Vec<Box<dyn ProviderAdapter>>,
    system_prompt: String,
}

impl FallbackDispatcher {
    /// `providers` must only hold adapters that initialized successfully.
    pub fn new(providers: Vec<Box<dyn ProviderAdapter>>, system_prompt: impl Into<String>) -> Self {
        Self {
            providers,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub async fn dispatch(&self, utterance: &str) -> Dispatch {
        if self.is_empty() {
            warn!("dispatch requested with no provider configured");
            return Dispatch {
                result: ProviderResult::Failure(NO_PROVIDER_CONFIGURED.to_string()),
                answered_by: None,
                failures: Vec::new(),
            };
        }

        let mut failures = Vec::new();

        for provider in &self.providers {
            debug!(provider = provider.name(), "trying provider");

            match provider.invoke(utterance, &self.system_prompt).await {
                ProviderResult::Success(text) => {
                    debug!(provider = provider.name(), "provider answered");
                    return Dispatch {
                        result: ProviderResult::Success(text),
                        answered_by: Some(provider.name().to_string()),
                        failures,
                    };
                }
                ProviderResult::Failure(reason) => {
                    warn!(provider = provider.name(), %reason, "provider failed");
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        reason,
                    });
                }
            }
        }

        let summary = failures
            .iter()
            .map(|f| format!("{}: {}", f.provider, f.reason))
            .collect::<Vec<_>>()
            .join("; ");

        Dispatch {
            result: ProviderResult::Failure(summary),
            answered_by: None,
            failures,
        }
    }
}
