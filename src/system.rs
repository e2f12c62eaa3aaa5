use std::env;

/// Descriptor of the machine Jarvis is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub release: String,
    pub machine: String,
}

impl SystemInfo {
    /// Detects the current system environment.
    pub fn detect() -> Self {
        let info = os_info::get();

        let machine = info
            .architecture()
            .map(str::to_string)
            .unwrap_or_else(|| env::consts::ARCH.to_string());

        SystemInfo {
            os: info.os_type().to_string(),
            release: info.version().to_string(),
            machine,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "System Information:\n- OS: {}\n- Release: {}\n- Machine: {}",
            self.os, self.release, self.machine
        )
    }
}
