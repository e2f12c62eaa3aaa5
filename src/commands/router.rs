use super::keywords::{
    Clock, DateCommand, KeywordCommand, SystemClock, SystemCommand, TimeCommand, WeatherCommand,
};
use crate::system::SystemInfo;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Answers the fixed keyword commands before anything reaches a provider.
///
/// Matching is exact after trimming and lowercasing; `"what time"` is not
/// `"time"`.
pub struct CommandRouter {
    commands: BTreeMap<&'static str, Box<dyn KeywordCommand>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), SystemInfo::detect())
    }

    pub fn with_clock(clock: Arc<dyn Clock>, info: SystemInfo) -> Self {
        let mut router = Self {
            commands: BTreeMap::new(),
        };

        router.register("time", TimeCommand::new(clock.clone()));
        router.register("date", DateCommand::new(clock));
        router.register("system", SystemCommand::new(info));
        router.register("weather", WeatherCommand);

        router
    }

    fn register<C: KeywordCommand + 'static>(&mut self, keyword: &'static str, command: C) {
        self.commands.insert(keyword, Box::new(command));
    }

    pub fn lookup(&self, utterance: &str) -> Option<String> {
        let key = utterance.trim().to_lowercase();
        self.commands.get(key.as_str()).map(|c| c.respond())
    }

    pub fn keywords(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn help_lines(&self) -> Vec<&'static str> {
        self.commands.values().map(|c| c.help()).collect()
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}
