#![allow(dead_code)]

use embassy_time::{Duration, Instant};
use shutdown_button::classifier::{Action, Thresholds};
use shutdown_button::event::Edge;
use shutdown_button::hardware::traits::{Button, Led};
use shutdown_button::monitor::ButtonMonitor;
use shutdown_button::power::PowerControl;
use shutdown_button::{Error, Result};
use std::cell::Cell;
use std::rc::Rc;

/// Button whose line level the test flips directly.
#[derive(Clone, Default)]
pub struct MockButton {
    level: Rc<Cell<bool>>,
}

impl MockButton {
    pub fn set_pressed(&self, pressed: bool) {
        self.level.set(pressed);
    }
}

impl Button for MockButton {
    fn is_pressed(&self) -> bool {
        self.level.get()
    }
}

#[derive(Default)]
pub struct MockLed {
    lit: bool,
    pub ever_lit: bool,
}

impl Led for MockLed {
    fn on(&mut self) {
        self.lit = true;
        self.ever_lit = true;
    }

    fn off(&mut self) {
        self.lit = false;
    }

    fn is_on(&self) -> bool {
        self.lit
    }
}

#[derive(Default)]
pub struct MockPower {
    pub reboots: usize,
    pub poweroffs: usize,
    pub failing: bool,
}

impl MockPower {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> (usize, usize) {
        (self.reboots, self.poweroffs)
    }

    fn outcome(&self, command: &str) -> Result<()> {
        if self.failing {
            return Err(Error::PowerCommandFailed {
                command: command.to_owned(),
                reason: "exit status: 1".to_owned(),
            });
        }
        Ok(())
    }
}

impl PowerControl for MockPower {
    fn reboot(&mut self) -> Result<()> {
        self.reboots += 1;
        self.outcome("/sbin/reboot")
    }

    fn poweroff(&mut self) -> Result<()> {
        self.poweroffs += 1;
        self.outcome("/sbin/poweroff")
    }
}

pub type Monitor = ButtonMonitor<MockButton, MockLed, MockPower>;

/// Drives a monitor on a simulated clock, one tick per second by default.
pub struct Bench {
    pub button: MockButton,
    pub monitor: Monitor,
}

pub fn at_secs(secs: f64) -> Instant {
    Instant::from_micros((secs * 1_000_000.0) as u64)
}

impl Bench {
    pub fn new() -> Self {
        Self::with_power(MockPower::default())
    }

    pub fn with_power(power: MockPower) -> Self {
        let button = MockButton::default();
        let monitor = ButtonMonitor::new(
            button.clone(),
            MockLed::default(),
            power,
            Duration::from_secs(1),
            Thresholds::default(),
        );
        Self { button, monitor }
    }

    pub fn led(&self) -> &MockLed {
        self.monitor.classifier().led()
    }

    pub fn power(&self) -> &MockPower {
        self.monitor.classifier().power()
    }

    pub fn press(&mut self, secs: f64) -> Result<Option<Action>> {
        self.button.set_pressed(true);
        self.monitor.on_edge(Edge::Pressed, at_secs(secs))
    }

    /// Serve every tick due up to and including `secs`.
    pub fn advance(&mut self, secs: f64) -> Result<()> {
        let until = at_secs(secs);
        while let Some(due) = self.monitor.timer().deadline() {
            if due > until {
                break;
            }
            self.monitor.on_tick(due)?;
        }
        Ok(())
    }

    pub fn release(&mut self, secs: f64) -> Result<Option<Action>> {
        self.advance(secs)?;
        self.button.set_pressed(false);
        self.monitor.on_edge(Edge::Released, at_secs(secs))
    }

    /// Full press/hold/release cycle starting at `start`.
    pub fn hold(&mut self, start: f64, held: f64) -> Result<Option<Action>> {
        self.press(start)?;
        self.release(start + held)
    }
}
