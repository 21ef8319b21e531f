pub mod debounce;
pub mod gpio_button;
pub mod gpio_led;
pub mod traits;

use crate::config::Config;
use crate::error::{Error, Result};
use gpio_button::GpioButton;
use gpio_led::GpioLed;
use rppal::gpio::{Gpio, OutputPin};
use std::time::Duration;

/// Debounce window handed to the interrupt layer.
pub const DEBOUNCE: Duration = Duration::from_millis(20);

pub type RpiLed = GpioLed<OutputPin>;

/// Claim the button and LED lines.
///
/// Fails before any interrupt is registered, so a half-claimed line is never
/// left with a live callback.
pub fn open(config: &Config) -> Result<(GpioButton, RpiLed)> {
    let unavailable =
        |pin: u8| move |source: rppal::gpio::Error| Error::HardwareUnavailable { pin, source };

    let gpio = Gpio::new().map_err(unavailable(config.button_pin))?;
    let button = gpio
        .get(config.button_pin)
        .map_err(unavailable(config.button_pin))?
        .into_input_pullup();
    let led = gpio
        .get(config.led_pin)
        .map_err(unavailable(config.led_pin))?
        .into_output_low();

    Ok((GpioButton::new(button), GpioLed::new(led)))
}
