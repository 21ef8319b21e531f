//! Press-duration state machine.
//!
//! [`PressClassifier::handle`] is the only way the hold session changes. The
//! owning task feeds it press, tick and release events one at a time, so each
//! tick is a complete max-accumulation step and a release dispatches at most
//! one action.

use crate::error::Result;
use crate::event::ButtonEvent;
use crate::hardware::traits::Led;
use crate::power::PowerControl;
use log::{debug, error, info, warn};

pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 2.0;
pub const DEFAULT_LONG_THRESHOLD: f64 = 5.0;

/// What a release does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ignore,
    Reboot,
    PowerOff,
}

/// Hold-duration band limits in seconds, `medium < long`.
///
/// A hold exactly on a limit belongs to the lower band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub medium: f64,
    pub long: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            medium: DEFAULT_MEDIUM_THRESHOLD,
            long: DEFAULT_LONG_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, held: f64) -> Action {
        if held > self.long {
            Action::PowerOff
        } else if held > self.medium {
            Action::Reboot
        } else {
            Action::Ignore
        }
    }

    /// The LED is lit only while a release would reboot.
    pub fn led_on(&self, held: f64) -> bool {
        self.classify(held) == Action::Reboot
    }
}

/// Longest hold observed during one press.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoldSession {
    max_held: f64,
}

impl HoldSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a tick sample in. Samples may arrive out of order, so the value
    /// only ever moves up.
    pub fn record(&mut self, sample: f64) -> f64 {
        self.max_held = self.max_held.max(sample);
        self.max_held
    }

    pub fn max_held(&self) -> f64 {
        self.max_held
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressState {
    Idle,
    Pressed(HoldSession),
}

pub struct PressClassifier<L, P> {
    led: L,
    power: P,
    thresholds: Thresholds,
    state: PressState,
}

impl<L: Led, P: PowerControl> PressClassifier<L, P> {
    pub fn new(led: L, power: P, thresholds: Thresholds) -> Self {
        Self {
            led,
            power,
            thresholds,
            state: PressState::Idle,
        }
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    pub fn power(&self) -> &P {
        &self.power
    }

    pub fn into_parts(self) -> (L, P) {
        (self.led, self.power)
    }

    /// Advance the state machine by one event.
    ///
    /// Returns the action taken when a release ends a press, `None` for every
    /// other event. A failed power command is returned as an error after the
    /// classifier is already back in `Idle`.
    pub fn handle(&mut self, event: ButtonEvent) -> Result<Option<Action>> {
        match (self.state, event) {
            (PressState::Idle, ButtonEvent::PressStarted) => {
                info!("button pressed");
                self.state = PressState::Pressed(HoldSession::new());
                Ok(None)
            }
            (PressState::Pressed(session), ButtonEvent::PressStarted) => {
                warn!(
                    "press while already pressed (held {:.1}s), restarting hold",
                    session.max_held()
                );
                self.state = PressState::Pressed(HoldSession::new());
                Ok(None)
            }
            (PressState::Pressed(mut session), ButtonEvent::HeldTick(sample)) => {
                let held = session.record(sample);
                self.state = PressState::Pressed(session);
                debug!("held sample {:.3}s, max {:.3}s", sample, held);
                if self.thresholds.led_on(held) {
                    self.led.on();
                } else {
                    self.led.off();
                }
                Ok(None)
            }
            (PressState::Pressed(session), ButtonEvent::Released) => {
                self.state = PressState::Idle;
                self.dispatch(session.max_held()).map(Some)
            }
            (PressState::Idle, ButtonEvent::HeldTick(sample)) => {
                debug!("stale tick {:.3}s after release ignored", sample);
                Ok(None)
            }
            (PressState::Idle, ButtonEvent::Released) => {
                debug!("release without press ignored");
                Ok(None)
            }
        }
    }

    fn dispatch(&mut self, held: f64) -> Result<Action> {
        let action = self.thresholds.classify(held);
        info!("button released after {:.1}s: {:?}", held, action);

        let outcome = match action {
            Action::Ignore => Ok(()),
            Action::Reboot => self.power.reboot(),
            Action::PowerOff => self.power.poweroff(),
        };

        match outcome {
            Ok(()) => {
                if action == Action::Ignore {
                    self.led.off();
                }
                Ok(action)
            }
            Err(e) => {
                error!("{:?} failed: {}", action, e);
                self.led.off();
                Err(e)
            }
        }
    }
}
