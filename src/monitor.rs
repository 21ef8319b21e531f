//! Button task body.
//!
//! [`ButtonMonitor`] owns the button, the hold timer, the debouncer and the
//! classifier (which owns the LED and power control). Edges from the
//! interrupt thread and ticks from the hold timer are both turned into
//! classifier events here, inside one task, so the hold session has exactly
//! one writer.

use crate::classifier::{Action, PressClassifier, Thresholds};
use crate::error::Result;
use crate::event::{ButtonEvent, Edge};
use crate::hardware::debounce::Debouncer;
use crate::hardware::gpio_button::EDGE_QUEUE_DEPTH;
use crate::hardware::traits::{Button, Led};
use crate::hold_timer::HoldTimer;
use crate::power::PowerControl;
use embassy_futures::select::{Either3, select3};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver},
    signal::Signal,
};
use embassy_time::{Duration, Instant, Timer};
use log::{debug, error, trace};

pub type EdgeChannel = Channel<CriticalSectionRawMutex, Edge, EDGE_QUEUE_DEPTH>;
pub type EdgeReceiver = Receiver<'static, CriticalSectionRawMutex, Edge, EDGE_QUEUE_DEPTH>;
pub type ShutdownSignal = Signal<CriticalSectionRawMutex, ()>;

pub struct ButtonMonitor<B, L, P> {
    button: B,
    debouncer: Debouncer,
    timer: HoldTimer,
    classifier: PressClassifier<L, P>,
}

impl<B, L, P> ButtonMonitor<B, L, P>
where
    B: Button,
    L: Led,
    P: PowerControl,
{
    pub fn new(button: B, led: L, power: P, tick_interval: Duration, thresholds: Thresholds) -> Self {
        // a button already held at startup must be released before it counts
        let debouncer = Debouncer::new(button.is_pressed());
        Self {
            button,
            debouncer,
            timer: HoldTimer::new(tick_interval),
            classifier: PressClassifier::new(led, power, thresholds),
        }
    }

    pub fn classifier(&self) -> &PressClassifier<L, P> {
        &self.classifier
    }

    pub fn timer(&self) -> &HoldTimer {
        &self.timer
    }

    /// Hand the hardware back for teardown.
    pub fn into_parts(self) -> (B, L, P) {
        let (led, power) = self.classifier.into_parts();
        (self.button, led, power)
    }

    /// Process one edge received at `now`.
    pub fn on_edge(&mut self, edge: Edge, now: Instant) -> Result<Option<Action>> {
        if !self.debouncer.accept(edge, self.button.is_pressed()) {
            trace!("spurious {:?} edge dropped", edge);
            return Ok(None);
        }

        match edge {
            Edge::Pressed => {
                self.timer.start(now);
                self.classifier.handle(ButtonEvent::PressStarted)
            }
            Edge::Released => {
                self.timer.stop();
                self.classifier.handle(ButtonEvent::Released)
            }
        }
    }

    /// Process the hold timer deadline passing at `now`.
    ///
    /// The due sample is always folded in. If the line already reads
    /// released, the press is ended here as well, so a release edge that was
    /// lost or filtered cannot leave the timer running.
    pub fn on_tick(&mut self, now: Instant) -> Result<Option<Action>> {
        let Some(sample) = self.timer.fire(now) else {
            return Ok(None);
        };
        self.classifier.handle(ButtonEvent::HeldTick(sample))?;

        if self.button.is_pressed() {
            return Ok(None);
        }
        debug!("button up at {:.3}s tick, ending press", sample);
        self.on_edge(Edge::Released, now)
    }

    /// Serve edges and ticks until `shutdown` is signalled.
    ///
    /// A due tick is served before a queued edge, so a tick racing a release
    /// still lands in the session it belongs to. Power command failures are
    /// logged and the loop keeps running.
    pub async fn run(&mut self, edges: EdgeReceiver, shutdown: &ShutdownSignal) {
        loop {
            let deadline = self.timer.deadline();
            let tick = async {
                match deadline {
                    Some(at) => Timer::at(at).await,
                    None => core::future::pending().await,
                }
            };

            let outcome = match select3(tick, edges.receive(), shutdown.wait()).await {
                Either3::First(()) => self.on_tick(Instant::now()),
                Either3::Second(edge) => self.on_edge(edge, Instant::now()),
                Either3::Third(()) => return,
            };

            if let Err(e) = outcome {
                error!("{}", e);
            }
        }
    }
}
