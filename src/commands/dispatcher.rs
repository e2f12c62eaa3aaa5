use super::{
    ChatState,
    handler::{HelpCommand, HistoryCommand, ProvidersCommand, QuitCommand},
    registry::CommandRegistry,
};
use crate::core::error::JarvisError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut ChatState,
    ) -> Result<Option<String>, JarvisError> {
        self.registry.execute(command, args, state)
    }

    /// Runs a `/command arg ...` line. Returns `None` for lines that are not
    /// slash commands.
    pub fn execute_line(
        &self,
        line: &str,
        state: &mut ChatState,
    ) -> Option<Result<Option<String>, JarvisError>> {
        let rest = line.trim().strip_prefix('/')?;
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let (command, args) = parts.split_first()?;
        Some(self.execute(command, args, state))
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("history", HistoryCommand);
    registry.register("providers", ProvidersCommand);

    CommandDispatcher::new(Arc::new(registry))
}
