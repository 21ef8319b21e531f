use crate::classifier::{DEFAULT_LONG_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD, Thresholds};
use crate::error::{Error, Result};
use crate::hold_timer;
use embassy_time::Duration;
use std::str::FromStr;

pub const DEFAULT_BUTTON_PIN: u8 = 26;
pub const DEFAULT_LED_PIN: u8 = 24;
pub const DEFAULT_TICK_INTERVAL: f64 = 1.0;
pub const MAX_TICK_INTERVAL: f64 = 3600.0;

pub const USAGE: &str = "\
Usage: shutdown-button [OPTIONS]

Hold the button longer than the medium threshold to reboot,
longer than the long threshold to power off.

Options:
  --button-pin <BCM>          button GPIO, active low [default: 26]
  --led-pin <BCM>             LED GPIO, active high [default: 24]
  --tick-interval <SECS>      hold sampling interval, below the long
                              threshold [default: 1.0]
  --medium-threshold <SECS>   reboot above this hold time [default: 2.0]
  --long-threshold <SECS>     power off above this hold time [default: 5.0]
  -h, --help                  print this help
";

/// Startup configuration. Pins are BCM numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub button_pin: u8,
    pub led_pin: u8,
    pub tick_interval_secs: f64,
    pub medium_threshold_secs: f64,
    pub long_threshold_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            button_pin: DEFAULT_BUTTON_PIN,
            led_pin: DEFAULT_LED_PIN,
            tick_interval_secs: DEFAULT_TICK_INTERVAL,
            medium_threshold_secs: DEFAULT_MEDIUM_THRESHOLD,
            long_threshold_secs: DEFAULT_LONG_THRESHOLD,
        }
    }
}

/// Result of reading the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse command-line arguments (without the program name).
    pub fn from_args<I, S>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                return Ok(Command::Help);
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_owned(), Some(value.to_owned())),
                None => (arg.clone(), None),
            };
            let mut value = || {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| Error::InvalidConfig(format!("{} needs a value", flag)))
            };

            match flag.as_str() {
                "--button-pin" => config.button_pin = parse(&flag, &value()?)?,
                "--led-pin" => config.led_pin = parse(&flag, &value()?)?,
                "--tick-interval" => config.tick_interval_secs = parse(&flag, &value()?)?,
                "--medium-threshold" => config.medium_threshold_secs = parse(&flag, &value()?)?,
                "--long-threshold" => config.long_threshold_secs = parse(&flag, &value()?)?,
                _ => return Err(Error::InvalidConfig(format!("unknown option {}", flag))),
            }
        }

        config.validate()?;
        Ok(Command::Run(config))
    }

    pub fn validate(&self) -> Result<()> {
        let secs = [
            ("tick interval", self.tick_interval_secs),
            ("medium threshold", self.medium_threshold_secs),
            ("long threshold", self.long_threshold_secs),
        ];
        for (name, value) in secs {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, value
                )));
            }
        }
        if self.medium_threshold_secs >= self.long_threshold_secs {
            return Err(Error::InvalidConfig(format!(
                "medium threshold ({}s) must be below long threshold ({}s)",
                self.medium_threshold_secs, self.long_threshold_secs
            )));
        }
        if hold_timer::from_seconds(self.tick_interval_secs) == Duration::from_ticks(0) {
            return Err(Error::InvalidConfig("tick interval below 1us".into()));
        }
        // keeps deadline arithmetic far from Instant overflow
        if self.tick_interval_secs > MAX_TICK_INTERVAL
            || self.tick_interval_secs >= self.long_threshold_secs
        {
            return Err(Error::InvalidConfig(format!(
                "tick interval ({}s) must be below the long threshold ({}s) and at most {}s",
                self.tick_interval_secs, self.long_threshold_secs, MAX_TICK_INTERVAL
            )));
        }
        if self.button_pin == self.led_pin {
            return Err(Error::InvalidConfig(format!(
                "button and LED share GPIO {}",
                self.button_pin
            )));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            medium: self.medium_threshold_secs,
            long: self.long_threshold_secs,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        hold_timer::from_seconds(self.tick_interval_secs)
    }
}

fn parse<T: FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{}: cannot parse {:?}", flag, value)))
}
