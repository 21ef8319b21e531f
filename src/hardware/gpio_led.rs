use super::traits::Led;
use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

/// Active-high LED on any `embedded-hal` output pin.
pub struct GpioLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> GpioLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Led for GpioLed<P> {
    fn on(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.lit = true,
            Err(e) => warn!("LED on failed: {:?}", e.kind()),
        }
    }

    fn off(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.lit = false,
            Err(e) => warn!("LED off failed: {:?}", e.kind()),
        }
    }

    fn is_on(&self) -> bool {
        self.lit
    }
}
