use crate::config::Provider;
use console::{Term, style};
use std::collections::HashMap;
use tracing::debug;

/// Source of a credential when neither the environment nor the config has one.
pub trait KeyPrompt {
    fn ask(&mut self, provider: Provider) -> Option<String>;
}

/// Asks on the terminal with hidden input.
pub struct TerminalPrompt;

impl KeyPrompt for TerminalPrompt {
    fn ask(&mut self, provider: Provider) -> Option<String> {
        let term = Term::stderr();
        let _ = term.write_line(&format!(
            "{} {} not found in environment.",
            style("⚠").bold().yellow(),
            style(provider.env_key()).bold()
        ));
        let _ = term.write_str(&format!(
            "Enter {} API key (leave empty to skip): ",
            provider
        ));

        match term.read_secure_line() {
            Ok(line) => non_blank(Some(line)),
            Err(e) => {
                debug!("could not read {} key from terminal: {}", provider, e);
                None
            }
        }
    }
}

/// Never asks; used for piped input and `--no-prompt`.
pub struct NoPrompt;

impl KeyPrompt for NoPrompt {
    fn ask(&mut self, _provider: Provider) -> Option<String> {
        None
    }
}

/// Asks the wrapped prompt at most once per provider and replays the answer,
/// including a skip.
pub struct RememberingPrompt {
    inner: Box<dyn KeyPrompt>,
    answers: HashMap<Provider, Option<String>>,
}

impl RememberingPrompt {
    pub fn new(inner: Box<dyn KeyPrompt>) -> Self {
        Self {
            inner,
            answers: HashMap::new(),
        }
    }
}

impl KeyPrompt for RememberingPrompt {
    fn ask(&mut self, provider: Provider) -> Option<String> {
        let inner = &mut self.inner;
        self.answers
            .entry(provider)
            .or_insert_with(|| inner.ask(provider))
            .clone()
    }
}

/// Resolves a provider credential: environment first, then the config file,
/// then the interactive prompt. Blank values count as missing.
pub fn resolve_api_key<E>(
    provider: Provider,
    configured: Option<&str>,
    env: E,
    prompt: &mut dyn KeyPrompt,
) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(key) = non_blank(env(provider.env_key())) {
        debug!("{} key taken from {}", provider, provider.env_key());
        return Some(key);
    }

    if let Some(key) = non_blank(configured.map(str::to_string)) {
        debug!("{} key taken from config file", provider);
        return Some(key);
    }

    prompt.ask(provider)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
