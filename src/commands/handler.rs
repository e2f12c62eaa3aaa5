use super::ChatState;
use crate::core::error::JarvisError;

use console::style;

/// A slash command of the interactive front-end. These are never sent to a
/// provider and never recorded as conversation turns.
pub trait CommandHandler: Send + Sync {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, JarvisError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct HistoryCommand;
pub struct ProvidersCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, JarvisError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, JarvisError> {
        let mut lines = vec![
            style("Available Commands").bold().underlined().to_string(),
            QuitCommand.help().to_string(),
            HelpCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            ProvidersCommand.help().to_string(),
            String::new(),
            style("Keywords answered locally").bold().underlined().to_string(),
        ];
        lines.extend(
            state
                .session
                .router()
                .help_lines()
                .into_iter()
                .map(str::to_string),
        );

        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, JarvisError> {
        let turns = state.session.conversation();
        if turns.is_empty() {
            return Ok(Some("No conversation yet.".to_string()));
        }

        let rendered = turns
            .iter()
            .map(|turn| {
                format!(
                    "{} {}\n{} {}",
                    style("You:").bold().cyan(),
                    turn.utterance,
                    style("Jarvis:").bold().magenta(),
                    turn.response
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(Some(rendered))
    }

    fn help(&self) -> &'static str {
        "/history - Show this session's conversation"
    }
}

impl CommandHandler for ProvidersCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, JarvisError> {
        let names = state.session.provider_names();
        if names.is_empty() {
            return Ok(Some(
                "No provider configured. Set OPENAI_API_KEY or GOOGLE_API_KEY.".to_string(),
            ));
        }

        Ok(Some(format!("Fallback order: {}", names.join(" -> "))))
    }

    fn help(&self) -> &'static str {
        "/providers - Show the provider fallback order"
    }
}
