use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A GPIO line could not be claimed or configured.
    #[error("GPIO {pin} unavailable: {source}")]
    HardwareUnavailable {
        pin: u8,
        #[source]
        source: rppal::gpio::Error,
    },

    /// A reboot/poweroff command could not be spawned or exited non-zero.
    #[error("power command `{command}` failed: {reason}")]
    PowerCommandFailed { command: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
