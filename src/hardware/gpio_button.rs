use super::traits::Button;
use crate::event::Edge;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Sender};
use log::warn;
use rppal::gpio::{Event, InputPin, Trigger};
use std::time::Duration;

pub type EdgeSender = Sender<'static, CriticalSectionRawMutex, Edge, EDGE_QUEUE_DEPTH>;

pub const EDGE_QUEUE_DEPTH: usize = 8;

/// Push-button between the pin and ground, read through the internal pull-up.
pub struct GpioButton {
    pin: InputPin,
    bcm: u8,
}

impl GpioButton {
    pub fn new(pin: InputPin) -> Self {
        let bcm = pin.pin();
        Self { pin, bcm }
    }

    pub fn pin(&self) -> u8 {
        self.bcm
    }

    /// Forward debounced edges into `edges` from rppal's interrupt thread.
    pub fn subscribe(&mut self, edges: EdgeSender, debounce: Duration) -> rppal::gpio::Result<()> {
        let bcm = self.bcm;
        self.pin
            .set_async_interrupt(Trigger::Both, Some(debounce), move |event: Event| {
                let edge = match event.trigger {
                    Trigger::FallingEdge => Edge::Pressed,
                    Trigger::RisingEdge => Edge::Released,
                    _ => return,
                };
                if edges.try_send(edge).is_err() {
                    warn!("GPIO {}: edge queue full, dropped {:?}", bcm, edge);
                }
            })
    }

    pub fn unsubscribe(&mut self) -> rppal::gpio::Result<()> {
        self.pin.clear_async_interrupt()
    }
}

impl Button for GpioButton {
    fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
