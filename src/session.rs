//! One user session: keyword commands first, then the provider fallback,
//! with every resolved reply recorded in order.

use crate::commands::router::CommandRouter;
use crate::providers::{FallbackDispatcher, ProviderFailure, ProviderResult};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub utterance: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Answered locally by a keyword command.
    Canned(String),
    /// Answered by the named provider.
    Provider { provider: String, text: String },
    /// No provider could answer.
    Failure(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Canned(text) => text,
            Reply::Provider { text, .. } => text,
            Reply::Failure(message) => message,
        }
    }
}

pub struct Session {
    router: CommandRouter,
    dispatcher: FallbackDispatcher,
    conversation: Vec<ConversationTurn>,
    last_failures: Vec<ProviderFailure>,
}

impl Session {
    pub fn new(router: CommandRouter, dispatcher: FallbackDispatcher) -> Self {
        Self {
            router,
            dispatcher,
            conversation: Vec::new(),
            last_failures: Vec::new(),
        }
    }

    pub async fn handle(&mut self, utterance: &str) -> Reply {
        let reply = match self.router.lookup(utterance) {
            Some(text) => {
                debug!("answered by keyword command");
                self.last_failures.clear();
                Reply::Canned(text)
            }
            None => {
                let dispatch = self.dispatcher.dispatch(utterance).await;
                self.last_failures = dispatch.failures;
                match dispatch.result {
                    ProviderResult::Success(text) => Reply::Provider {
                        provider: dispatch.answered_by.unwrap_or_default(),
                        text,
                    },
                    ProviderResult::Failure(reason) => {
                        Reply::Failure(format!("Sorry, I couldn't get an answer: {}", reason))
                    }
                }
            }
        };

        self.conversation.push(ConversationTurn {
            utterance: utterance.to_string(),
            response: reply.text().to_string(),
        });

        reply
    }

    pub fn conversation(&self) -> &[ConversationTurn] {
        &self.conversation
    }

    /// Providers that failed while resolving the most recent utterance.
    pub fn last_failures(&self) -> &[ProviderFailure] {
        &self.last_failures
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.dispatcher.provider_names()
    }
}
