//! Single-button reboot / power-off controller for Linux GPIO boards.
//!
//! A push-button on one GPIO line is debounced and timed while held; the
//! hold duration selects between ignoring the press, rebooting and powering
//! off. An LED on a second line lights up while a release would reboot.

pub mod classifier;
pub mod config;
pub mod error;
pub mod event;
pub mod hardware;
pub mod hold_timer;
pub mod monitor;
pub mod power;

pub use error::{Error, Result};
