//! Raspberry Pi Reboot / Power-off Button
//! =============================================================================================
//!
//! Hardware Connections:
//!   Button -> GPIO26 (BCM) and GND, internal pull-up enabled
//!   LED    -> GPIO24 (BCM) through a series resistor to GND
//!
//! Behaviour:
//! 1. Release before 2s: nothing happens
//! 2. Hold past 2s: LED lights, release reboots
//! 3. Hold past 5s: LED goes dark again, release powers off
//!
//! Pins and timings can be overridden on the command line, see `--help`.
//! SIGINT/SIGTERM release the GPIO lines and exit cleanly.

use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use log::{error, info, warn};
use shutdown_button::{
    config::{Command, Config, USAGE},
    hardware::{self, RpiLed, gpio_button::GpioButton, traits::Led as _},
    monitor::{ButtonMonitor, EdgeChannel, ShutdownSignal},
    power::SystemPower,
};
use std::process::exit;

type Monitor = ButtonMonitor<GpioButton, RpiLed, SystemPower>;

// Edges from rppal's interrupt thread to the button task
static EDGE_CHANNEL: EdgeChannel = EdgeChannel::new();

// Raised by the signal handler
static SHUTDOWN: ShutdownSignal = Signal::new();

// Raised by the button task once the lines are released
static STOPPED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print!("{}", USAGE);
            exit(0);
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            exit(2);
        }
    };
    info!("{:?}", config);

    // Claim both lines before any interrupt is armed
    let (mut button, led) = match hardware::open(&config) {
        Ok(parts) => parts,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };

    if let Err(source) = button.subscribe(EDGE_CHANNEL.sender(), hardware::DEBOUNCE) {
        error!(
            "{}",
            shutdown_button::Error::HardwareUnavailable {
                pin: config.button_pin,
                source,
            }
        );
        exit(1);
    }

    let monitor = ButtonMonitor::new(
        button,
        led,
        SystemPower::new(),
        config.tick_interval(),
        config.thresholds(),
    );

    if let Err(e) = ctrlc::set_handler(|| SHUTDOWN.signal(())) {
        warn!("no signal handler, GPIO lines will not be released on exit: {}", e);
    }

    spawner
        .spawn(button_task(monitor))
        .expect("Failed to spawn button task");

    info!(
        "watching GPIO {} (LED on GPIO {})",
        config.button_pin, config.led_pin
    );

    // Everything else happens in the button task
    STOPPED.wait().await;
    info!("stopped");
    exit(0);
}

/// Button Task
///
/// Responsibilities:
/// 1. Turn edges and hold ticks into press classifications
/// 2. Drive the LED and run reboot/poweroff on release
/// 3. Release the GPIO lines on shutdown
#[embassy_executor::task]
async fn button_task(mut monitor: Monitor) {
    monitor.run(EDGE_CHANNEL.receiver(), &SHUTDOWN).await;

    let (mut button, mut led, _) = monitor.into_parts();
    if let Err(e) = button.unsubscribe() {
        warn!("GPIO {}: clearing interrupt failed: {}", button.pin(), e);
    }
    led.off();

    STOPPED.signal(());
}
