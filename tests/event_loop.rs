mod common;

use common::{MockButton, MockLed, MockPower};
use embassy_executor::Executor;
use embassy_futures::join::join;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use shutdown_button::classifier::{PressState, Thresholds};
use shutdown_button::event::Edge;
use shutdown_button::monitor::{ButtonMonitor, EdgeChannel, ShutdownSignal};
use std::sync::mpsc;

static EDGES: EdgeChannel = EdgeChannel::new();
static SHUTDOWN: ShutdownSignal = Signal::new();

type Outcome = ((usize, usize), PressState);

// 100ms ticks, reboot above 0.25s. Samples before the release edge top out
// at 0.2s, so serving the queued edge before the due tick would ignore the
// press.
#[embassy_executor::task]
async fn press_and_stop(done: mpsc::Sender<Outcome>) {
    let button = MockButton::default();
    let mut monitor = ButtonMonitor::new(
        button.clone(),
        MockLed::default(),
        MockPower::default(),
        Duration::from_millis(100),
        Thresholds {
            medium: 0.25,
            long: 10.0,
        },
    );

    let driver = async {
        button.set_pressed(true);
        EDGES.send(Edge::Pressed).await;
        Timer::after(Duration::from_millis(220)).await;

        button.set_pressed(false);
        EDGES.send(Edge::Released).await;
        // block the executor so the next tick comes due behind the edge
        std::thread::sleep(std::time::Duration::from_millis(150));

        Timer::after(Duration::from_millis(50)).await;
        SHUTDOWN.signal(());
    };

    join(monitor.run(EDGES.receiver(), &SHUTDOWN), driver).await;

    let _ = done.send((
        monitor.classifier().power().calls(),
        monitor.classifier().state(),
    ));
}

#[test]
fn due_tick_is_served_before_queued_release() {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
        executor.run(|spawner| spawner.spawn(press_and_stop(tx)).unwrap());
    });

    // `run` must return on shutdown for the outcome to be sent at all
    let (calls, state) = rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("monitor did not stop");
    assert_eq!(calls, (1, 0));
    assert_eq!(state, PressState::Idle);
}
