use crate::system::SystemInfo;
use chrono::{DateTime, Local};
use std::sync::Arc;

pub const WEATHER_NOT_IMPLEMENTED: &str =
    "Sorry, weather API integration is not implemented in this version.";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A locally answered keyword. Never touches the network.
pub trait KeywordCommand: Send + Sync {
    fn respond(&self) -> String;
    fn help(&self) -> &'static str;
}

pub struct TimeCommand {
    clock: Arc<dyn Clock>,
}

pub struct DateCommand {
    clock: Arc<dyn Clock>,
}

pub struct SystemCommand {
    info: SystemInfo,
}

pub struct WeatherCommand;

impl TimeCommand {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl DateCommand {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl SystemCommand {
    pub fn new(info: SystemInfo) -> Self {
        Self { info }
    }
}

impl KeywordCommand for TimeCommand {
    fn respond(&self) -> String {
        format!("Current time is: {}", self.clock.now().format("%I:%M %p"))
    }

    fn help(&self) -> &'static str {
        "time - current local time"
    }
}

impl KeywordCommand for DateCommand {
    fn respond(&self) -> String {
        format!("Today's date is: {}", self.clock.now().format("%B %d, %Y"))
    }

    fn help(&self) -> &'static str {
        "date - today's date"
    }
}

impl KeywordCommand for SystemCommand {
    fn respond(&self) -> String {
        self.info.describe()
    }

    fn help(&self) -> &'static str {
        "system - OS, release and machine architecture"
    }
}

impl KeywordCommand for WeatherCommand {
    fn respond(&self) -> String {
        WEATHER_NOT_IMPLEMENTED.to_string()
    }

    fn help(&self) -> &'static str {
        "weather - not available yet"
    }
}
