use crate::error::{Error, Result};
use log::info;
use std::process::Command;

pub const REBOOT_COMMAND: &str = "/sbin/reboot";
pub const POWEROFF_COMMAND: &str = "/sbin/poweroff";

/// Machine-level power actions. Failures are returned, never retried.
pub trait PowerControl {
    fn reboot(&mut self) -> Result<()>;
    fn poweroff(&mut self) -> Result<()>;
}

/// Runs the system's reboot/poweroff programs and waits for them to exit.
#[derive(Debug, Clone)]
pub struct SystemPower {
    reboot: String,
    poweroff: String,
}

impl Default for SystemPower {
    fn default() -> Self {
        Self::with_commands(REBOOT_COMMAND, POWEROFF_COMMAND)
    }
}

impl SystemPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commands(reboot: impl Into<String>, poweroff: impl Into<String>) -> Self {
        Self {
            reboot: reboot.into(),
            poweroff: poweroff.into(),
        }
    }

    fn run(command: &str) -> Result<()> {
        info!("running {}", command);
        let failed = |reason: String| Error::PowerCommandFailed {
            command: command.to_owned(),
            reason,
        };

        let status = Command::new(command)
            .status()
            .map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(status.to_string()))
        }
    }
}

impl PowerControl for SystemPower {
    fn reboot(&mut self) -> Result<()> {
        Self::run(&self.reboot)
    }

    fn poweroff(&mut self) -> Result<()> {
        Self::run(&self.poweroff)
    }
}
